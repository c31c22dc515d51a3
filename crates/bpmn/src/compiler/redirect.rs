use tracing::debug;

use super::Compiler;

impl Compiler<'_, '_> {
    /// Follows bypassed gateways starting at `target` until reaching an id that
    /// was not bypassed. Returns `None` when the chain leads back to `gateway_id`.
    pub(super) fn final_replacement(&self, gateway_id: &str, target: &str) -> Option<String> {
        let mut current = target;
        loop {
            if current == gateway_id {
                return None;
            }
            match self.elided.get(current) {
                Some(next) => current = next,
                None => return Some(current.to_string()),
            }
        }
    }

    /// Points every transition aimed at `old_target` at `new_target` instead,
    /// including the workflow entry point. Returns how many references changed.
    pub(super) fn redirect(&mut self, old_target: &str, new_target: &str) -> usize {
        let mut rewritten = 0;
        for step in self.workflow.steps.values_mut() {
            for transition in step.transitions_mut() {
                if transition.step_name == old_target {
                    transition.step_name = new_target.to_string();
                    rewritten += 1;
                }
            }
        }
        if self.workflow.entry_point == old_target {
            self.workflow.entry_point = new_target.to_string();
            rewritten += 1;
        }
        debug!(from = %old_target, to = %new_target, rewritten, "redirected transitions");
        rewritten
    }
}
