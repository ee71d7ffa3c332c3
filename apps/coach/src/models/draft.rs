/// Where a workflow result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Produced by the configured model.
    Model,
    /// The built-in sample, because no key is configured or the model's reply
    /// did not have the expected shape.
    Sample,
}

/// An unsaved workflow result, owned by the view that produced it until the
/// user saves or discards it.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft<T> {
    pub payload: T,
    pub origin: Origin,
}

impl<T> Draft<T> {
    pub fn from_model(payload: T) -> Self {
        Self {
            payload,
            origin: Origin::Model,
        }
    }

    pub fn sample(payload: T) -> Self {
        Self {
            payload,
            origin: Origin::Sample,
        }
    }

    pub fn is_sample(&self) -> bool {
        self.origin == Origin::Sample
    }
}
