use guideflow_types::{Step, Transition};

use super::{Compiler, prompt_of, targets};
use crate::document::BpmnElement;
use crate::flow::LiveFlow;

impl<'d> Compiler<'d, '_> {
    /// Handles an exclusive gateway according to its fan-out.
    ///
    /// No flows: the gateway becomes an end step. One flow: the gateway is
    /// bypassed and its predecessors point at the successor. Two or more: a
    /// condition step with one transition per flow.
    pub(super) fn build_condition(
        &mut self,
        element: &'d BpmnElement,
        outgoing: Vec<LiveFlow<'d>>,
    ) -> Vec<&'d BpmnElement> {
        match outgoing.as_slice() {
            [] => {
                self.warn(format!(
                    "no flow going out of gateway {}, transform it into endEvent",
                    element.id
                ));
                self.register(&element.id, Step::end(element.name.clone().unwrap_or_default()));
                Vec::new()
            }
            [single] => self.elide_gateway(element, single.target),
            flows => {
                let transitions = flows
                    .iter()
                    .map(|flow| {
                        let label = flow.label().map(str::to_string);
                        Transition::new(flow.target.id.clone(), label.clone().unwrap_or_default()).with_answer(label)
                    })
                    .collect();
                self.register(
                    &element.id,
                    Step::Condition {
                        title: element.name.clone().unwrap_or_default(),
                        prompt: prompt_of(element),
                        outgoing: transitions,
                    },
                );
                targets(flows)
            }
        }
    }

    fn elide_gateway(&mut self, gateway: &'d BpmnElement, successor: &'d BpmnElement) -> Vec<&'d BpmnElement> {
        self.warn(format!(
            "single outgoing flow from the gateway {}, skipping the gateway",
            gateway.id
        ));

        let Some(replacement) = self.final_replacement(&gateway.id, &successor.id) else {
            // Every path out of this gateway runs through bypassed gateways back into it.
            self.warn(format!(
                "gateway {} only leads back to itself through single-flow gateways, transform it into endEvent",
                gateway.id
            ));
            self.register(&gateway.id, Step::end(gateway.name.clone().unwrap_or_default()));
            return Vec::new();
        };

        self.elided.insert(gateway.id.clone(), replacement.clone());
        self.redirect(&gateway.id, &replacement);
        vec![successor]
    }
}
