//! Modal stack for overlays drawn above the current screen
//!
//! Only the top modal receives key events.

/// A modal overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Login dialog (state lives in `LoginFlow`)
    Login,
    /// Keyboard shortcuts and endpoint table
    Help,
}

/// A stack of modal overlays
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    /// Remove every instance of a modal wherever it sits in the stack
    pub fn remove(&mut self, modal: &Modal) {
        self.stack.retain(|m| m != modal);
    }
}

#[cfg(test)]
impl ModalStack {
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::QuitConfirm);
        stack.push(Modal::Login);

        assert_eq!(stack.pop(), Some(Modal::Login));
        assert_eq!(stack.pop(), Some(Modal::QuitConfirm));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_remove_buried_modal() {
        let mut stack = ModalStack::new();
        stack.push(Modal::Login);
        stack.push(Modal::Help);
        stack.remove(&Modal::Login);
        assert_eq!(stack.top(), Some(&Modal::Help));
        stack.pop();
        assert!(stack.is_empty());
    }
}
