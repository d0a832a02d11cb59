//! Per-invocation call context
//!
//! The host invokes add-in functions from several places: a worksheet cell
//! during recalculation, a command/menu action, or somewhere the host does
//! not identify. Calling-range tracking and error correlation only apply to
//! cell calls.

use crate::reference::RangeReference;

/// Where the current function call originated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    /// A worksheet formula; carries the caller's normalized reference
    Cell(RangeReference),
    /// A command or menu action
    Command,
    /// The host could not identify the caller
    Unknown,
}

/// Context for a single add-in function invocation, passed explicitly to
/// every operation that cares where it was called from
#[derive(Debug, Clone)]
pub struct CallContext {
    function: String,
    caller: Caller,
}

impl CallContext {
    /// Context for a call from a worksheet cell
    pub fn cell(function: impl Into<String>, reference: RangeReference) -> Self {
        Self {
            function: function.into(),
            caller: Caller::Cell(reference),
        }
    }

    /// Context for a call from a command or menu action
    pub fn command(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            caller: Caller::Command,
        }
    }

    /// Context for a call the host could not attribute
    pub fn unknown(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            caller: Caller::Unknown,
        }
    }

    /// Name of the function being invoked
    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn caller(&self) -> &Caller {
        &self.caller
    }

    /// The caller's reference, when this is a cell call
    pub fn cell_reference(&self) -> Option<&RangeReference> {
        match &self.caller {
            Caller::Cell(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn is_cell(&self) -> bool {
        matches!(self.caller, Caller::Cell(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_context() {
        let reference = RangeReference::parse("SHEET1!A1").unwrap();
        let ctx = CallContext::cell("hbMakeModel", reference.clone());

        assert_eq!(ctx.function(), "hbMakeModel");
        assert!(ctx.is_cell());
        assert_eq!(ctx.cell_reference(), Some(&reference));
    }

    #[test]
    fn test_command_context() {
        let ctx = CallContext::command("hbCollectGarbage");
        assert!(!ctx.is_cell());
        assert_eq!(ctx.cell_reference(), None);
    }
}
