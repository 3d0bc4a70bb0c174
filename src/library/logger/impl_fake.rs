use crate::error::BoxError;
use crate::library::logger::interface::Logger;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    pub level: &'static str,
    pub namespace: Option<String>,
    pub message: String,
}

/// Records every line in memory. Namespaced children share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct LoggerFake {
    namespace: Option<String>,
    lines: Arc<Mutex<Vec<LogLine>>>,
}

impl LoggerFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<LogLine> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn errors(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|l| l.level == "ERROR")
            .map(|l| l.message)
            .collect()
    }

    fn push(&self, level: &'static str, message: &str) -> Result<(), BoxError> {
        let mut lines = self.lines.lock().map_err(|e| e.to_string())?;
        lines.push(LogLine {
            level,
            namespace: self.namespace.clone(),
            message: message.to_string(),
        });
        Ok(())
    }
}

impl Logger for LoggerFake {
    fn info(&self, message: &str) -> Result<(), BoxError> {
        self.push("INFO", message)
    }

    fn error(&self, message: &str) -> Result<(), BoxError> {
        self.push("ERROR", message)
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        let new_namespace = match &self.namespace {
            Some(current) => format!("{}:{}", current, namespace),
            None => namespace.to_string(),
        };

        Arc::new(LoggerFake {
            namespace: Some(new_namespace),
            lines: self.lines.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaces_share_buffer() {
        let logger = LoggerFake::new();
        let child = logger.with_namespace("diagnosis").with_namespace("service");

        child.info("started").unwrap();
        child.error("failed").unwrap();

        let lines = logger.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].namespace.as_deref(), Some("diagnosis:service"));
        assert_eq!(logger.errors(), vec!["failed".to_string()]);
    }
}
