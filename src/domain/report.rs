/// A value plus the caller-visible warnings collected while producing it.
///
/// Listing and fetching steps never fail on upstream HTTP errors; they hand
/// back whatever they managed to gather and describe what went wrong here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reported<T> {
    pub value: T,
    pub warnings: Vec<String>,
}

impl<T> Reported<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(value: T, warning: impl Into<String>) -> Self {
        Self {
            value,
            warnings: vec![warning.into()],
        }
    }

    pub fn warn(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn drain_into(self, sink: &mut Vec<String>) -> T {
        sink.extend(self.warnings);
        self.value
    }
}
