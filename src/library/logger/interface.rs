use crate::error::BoxError;
use std::sync::Arc;

pub trait Logger: Send + Sync {
    fn info(&self, message: &str) -> Result<(), BoxError>;
    fn error(&self, message: &str) -> Result<(), BoxError>;
    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync>;
}
