use crate::backend::DependencyLister;
use crate::ListerError;
use std::cell::RefCell;

/// Returns canned output and records every target it was asked about.
#[derive(Default)]
pub struct MockLister {
    output: String,
    fail: bool,
    calls: RefCell<Vec<String>>,
}

impl MockLister {
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            ..Self::default()
        }
    }

    /// A lister whose tool is missing.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl DependencyLister for MockLister {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn available(&self) -> bool {
        !self.fail
    }

    fn run(&self, target: &str) -> Result<String, ListerError> {
        self.calls.borrow_mut().push(target.to_owned());
        if self.fail {
            return Err(ListerError::Unavailable {
                tool: "mock".to_owned(),
                hint: crate::MSYS_INSTALL_HINT.to_owned(),
            });
        }
        Ok(self.output.clone())
    }
}
