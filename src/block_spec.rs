use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Namespace assumed when a block id carries none.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// A block-state property value as written in command text.
///
/// `true`/`false` tokens parse as booleans, optional-sign digit strings as
/// integers, anything else stays a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateValue {
    Bool(bool),
    Int(i64),
    Str(SmolStr),
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateValue::Bool(b) => write!(f, "{}", b),
            StateValue::Int(i) => write!(f, "{}", i),
            StateValue::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for StateValue {
    fn from(s: &str) -> Self {
        StateValue::Str(s.into())
    }
}

impl From<bool> for StateValue {
    fn from(b: bool) -> Self {
        StateValue::Bool(b)
    }
}

impl From<i64> for StateValue {
    fn from(i: i64) -> Self {
        StateValue::Int(i)
    }
}

/// A namespaced block identifier with optional state properties.
///
/// State keys are unique and kept in insertion order for round-trip
/// formatting.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct BlockSpec {
    pub namespace: SmolStr,
    pub id: SmolStr,
    pub states: Vec<(SmolStr, StateValue)>,
}

impl BlockSpec {
    pub fn new(namespace: impl Into<SmolStr>, id: impl Into<SmolStr>) -> Self {
        BlockSpec {
            namespace: namespace.into(),
            id: id.into(),
            states: Vec::new(),
        }
    }

    pub fn air() -> Self {
        BlockSpec::new(DEFAULT_NAMESPACE, "air")
    }

    pub fn is_air(&self) -> bool {
        self.namespace == DEFAULT_NAMESPACE && self.id == "air"
    }

    /// Full namespaced id, e.g. `minecraft:stone`.
    pub fn full_id(&self) -> String {
        format!("{}:{}", self.namespace, self.id)
    }

    pub fn with_state(mut self, key: impl Into<SmolStr>, value: impl Into<StateValue>) -> Self {
        self.set_state(key, value);
        self
    }

    pub fn set_state(&mut self, key: impl Into<SmolStr>, value: impl Into<StateValue>) {
        let key = key.into();
        let value = value.into();
        for (k, v) in &mut self.states {
            if *k == key {
                *v = value;
                return;
            }
        }
        self.states.push((key, value));
    }

    pub fn get_state(&self, key: &str) -> Option<&StateValue> {
        for (k, v) in &self.states {
            if k == key {
                return Some(v);
            }
        }
        None
    }
}

impl PartialEq for BlockSpec {
    fn eq(&self, other: &Self) -> bool {
        if self.namespace != other.namespace
            || self.id != other.id
            || self.states.len() != other.states.len()
        {
            return false;
        }
        // State order never affects equality.
        self.states
            .iter()
            .all(|(k, v)| other.get_state(k) == Some(v))
    }
}

impl Hash for BlockSpec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // States stay out of the hash so key order cannot split palette
        // entries; Eq disambiguates same-name specs.
        self.namespace.hash(state);
        self.id.hash(state);
        self.states.len().hash(state);
    }
}

impl fmt::Display for BlockSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.id)?;
        if !self.states.is_empty() {
            write!(f, "[")?;
            for (i, (key, value)) in self.states.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}={}", key, value)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}
