//! Outgoing header construction.

use super::config::PropagationConfig;
use super::reader::ContextReader;
use std::collections::HashMap;
use tracing::debug;

/// Builds the metadata headers for outgoing calls from a context reader.
///
/// The header set is rebuilt from scratch on every call, so entries removed
/// from the context since the previous call are not sent again.
#[derive(Debug)]
pub struct HeaderInjector<R> {
    reader: R,
    config: PropagationConfig,
    headers: HashMap<String, String>,
}

impl<R: ContextReader> HeaderInjector<R> {
    /// Creates an injector.
    #[must_use]
    pub fn new(reader: R, config: PropagationConfig) -> Self {
        Self {
            reader,
            config,
            headers: HashMap::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &PropagationConfig {
        &self.config
    }

    /// Rebuilds and returns the headers for the next outgoing call.
    pub fn outgoing_headers(&mut self) -> &HashMap<String, String> {
        self.headers.clear();
        self.headers.extend(
            self.config
                .static_headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        if let Some(context) = self.reader.copy_of_context_map() {
            for (key, value) in context {
                if self.config.forwards(&key) {
                    self.headers.insert(self.config.header_name(&key), value);
                }
            }
        }

        debug!(header_count = self.headers.len(), "Prepared outgoing context headers");
        &self.headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagation::{CurrentContext, MockContextReader};
    use crate::scope::Mdc;
    use pretty_assertions::assert_eq;

    fn headers(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_static_headers_without_context() {
        let mut reader = MockContextReader::new();
        reader.expect_copy_of_context_map().times(1).returning(|| None);

        let config = PropagationConfig::new().with_static_header("X-Client", "svc");
        let mut injector = HeaderInjector::new(reader, config);

        assert_eq!(injector.outgoing_headers(), &headers(&[("X-Client", "svc")]));
    }

    #[test]
    fn test_context_overrides_static_and_is_prefixed() {
        let mut reader = MockContextReader::new();
        reader.expect_copy_of_context_map().times(1).returning(|| {
            Some(headers(&[("trace_id", "t1"), ("secret", "s")]))
        });

        let config = PropagationConfig::new()
            .with_header_prefix("X-Mdc-")
            .with_static_header("X-Mdc-trace_id", "stale")
            .with_include_keys(["trace_id"]);
        let mut injector = HeaderInjector::new(reader, config);

        assert_eq!(
            injector.outgoing_headers(),
            &headers(&[("X-Mdc-trace_id", "t1")])
        );
    }

    #[test]
    fn test_headers_rebuilt_each_call() {
        let mut reader = MockContextReader::new();
        let mut seq = mockall::Sequence::new();
        reader
            .expect_copy_of_context_map()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Some(headers(&[("a", "1"), ("b", "2")])));
        reader
            .expect_copy_of_context_map()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Some(headers(&[("a", "1")])));

        let mut injector = HeaderInjector::new(reader, PropagationConfig::new());

        assert_eq!(injector.outgoing_headers().len(), 2);
        assert_eq!(injector.outgoing_headers(), &headers(&[("a", "1")]));
    }

    #[test]
    fn test_current_context_injection() {
        Mdc::set_context_map([("trace_id", "t1")]);
        let mut injector = HeaderInjector::new(CurrentContext, PropagationConfig::new());

        assert_eq!(injector.outgoing_headers(), &headers(&[("trace_id", "t1")]));
        Mdc::clear();
    }
}
