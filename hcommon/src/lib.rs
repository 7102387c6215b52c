//! Shared primitives used across the healthmate workspace crates.
//!
//! ```rust
//! use hcommon::{GenerationOptions, SessionId, TraceId};
//!
//! let session = SessionId::from("conversation-1");
//! let trace = TraceId::new("trace-1");
//!
//! let options = GenerationOptions::default().with_temperature(0.3);
//! assert_eq!(session.as_str(), "conversation-1");
//! assert_eq!(trace.to_string(), "trace-1");
//! assert_eq!(options.temperature, Some(0.3));
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use hcommon::BoxFuture;
    //!
    //! fn word_count<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.split_whitespace().count() })
    //! }
    //!
    //! let _future = word_count("how many calories");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Request-context identifiers passed explicitly through every call.
    //!
    //! A conversation is identified by a [`SessionId`] owned by its session
    //! rather than by any process-wide "current user" value.
    //!
    //! ```rust
    //! use hcommon::{SessionId, TraceId};
    //!
    //! let generated = SessionId::generate();
    //! assert!(!generated.as_str().is_empty());
    //!
    //! let trace = TraceId::from("trace-42");
    //! assert_eq!(trace.as_str(), "trace-42");
    //! assert_ne!(TraceId::generate(), TraceId::generate());
    //! ```

    use std::fmt::{Display, Formatter};

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct SessionId(String);

    impl SessionId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        /// Creates a random v4-uuid backed identifier.
        pub fn generate() -> Self {
            Self(uuid::Uuid::new_v4().to_string())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }
    }

    impl Display for SessionId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for SessionId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for SessionId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct TraceId(String);

    impl TraceId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        /// Fresh identifier for one `ask`, shared by every tool call it makes.
        pub fn generate() -> Self {
            Self(uuid::Uuid::new_v4().to_string())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }
    }

    impl Display for TraceId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for TraceId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for TraceId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }
}

pub mod model {
    //! Sampling settings forwarded to the chat endpoint.

    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct GenerationOptions {
        pub temperature: Option<f32>,
        pub max_tokens: Option<u32>,
    }

    impl GenerationOptions {
        pub fn with_temperature(mut self, temperature: f32) -> Self {
            self.temperature = Some(temperature);
            self
        }

        pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
            self.max_tokens = Some(max_tokens);
            self
        }
    }
}

pub mod registry {
    //! Name-keyed registry that remembers insertion order.
    //!
    //! Tool schemas are advertised to the model in the order tools were
    //! registered, so iteration order here is part of the contract.
    //!
    //! ```rust
    //! use hcommon::Registry;
    //!
    //! let mut registry = Registry::new();
    //! registry.insert("calculate_bmi".to_string(), 1_u32);
    //! registry.insert("calculate_bmr".to_string(), 2_u32);
    //!
    //! let keys: Vec<_> = registry.keys().cloned().collect();
    //! assert_eq!(keys, vec!["calculate_bmi", "calculate_bmr"]);
    //! ```

    use std::borrow::Borrow;
    use std::collections::HashMap;
    use std::hash::Hash;

    #[derive(Debug, Clone)]
    pub struct Registry<K, V> {
        order: Vec<K>,
        items: HashMap<K, V>,
    }

    impl<K, V> Default for Registry<K, V>
    where
        K: Eq + Hash,
    {
        fn default() -> Self {
            Self {
                order: Vec::new(),
                items: HashMap::new(),
            }
        }
    }

    impl<K, V> Registry<K, V>
    where
        K: Eq + Hash + Clone,
    {
        pub fn new() -> Self {
            Self::default()
        }

        /// Inserts or replaces a value. A replaced key keeps its original position.
        pub fn insert(&mut self, key: K, value: V) -> Option<V> {
            let previous = self.items.insert(key.clone(), value);
            if previous.is_none() {
                self.order.push(key);
            }

            previous
        }

        pub fn get<Q>(&self, key: &Q) -> Option<&V>
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.items.get(key)
        }

        pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            let removed = self.items.remove(key)?;
            self.order
                .retain(|existing| Borrow::<Q>::borrow(existing) != key);
            Some(removed)
        }

        pub fn contains_key<Q>(&self, key: &Q) -> bool
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.items.contains_key(key)
        }

        pub fn keys(&self) -> impl Iterator<Item = &K> {
            self.order.iter()
        }

        pub fn values(&self) -> impl Iterator<Item = &V> {
            self.order.iter().filter_map(|key| self.items.get(key))
        }

        pub fn len(&self) -> usize {
            self.items.len()
        }

        pub fn is_empty(&self) -> bool {
            self.items.is_empty()
        }
    }
}

pub use context::{SessionId, TraceId};
pub use future::BoxFuture;
pub use model::GenerationOptions;
pub use registry::Registry;

#[cfg(test)]
mod tests {
    use super::{GenerationOptions, Registry, SessionId};

    #[test]
    fn generated_session_ids_are_unique() {
        let first = SessionId::generate();
        let second = SessionId::generate();

        assert_ne!(first, second);
        assert_eq!(first.to_string(), first.as_str());
    }

    #[test]
    fn generation_options_start_unset() {
        assert_eq!(GenerationOptions::default().temperature, None);

        let options = GenerationOptions::default().with_max_tokens(256);
        assert_eq!(options.max_tokens, Some(256));
        assert_eq!(options.temperature, None);
    }

    #[test]
    fn registry_preserves_insertion_order_across_replace_and_remove() {
        let mut registry = Registry::new();
        registry.insert("b".to_string(), 1_u32);
        registry.insert("a".to_string(), 2_u32);
        registry.insert("c".to_string(), 3_u32);

        assert_eq!(registry.insert("b".to_string(), 10), Some(1));
        assert_eq!(registry.values().copied().collect::<Vec<_>>(), vec![10, 2, 3]);

        assert_eq!(registry.remove("a"), Some(2));
        assert_eq!(
            registry.keys().cloned().collect::<Vec<_>>(),
            vec!["b".to_string(), "c".to_string()]
        );
        assert_eq!(registry.len(), 2);
        assert!(!registry.contains_key("a"));
    }
}
