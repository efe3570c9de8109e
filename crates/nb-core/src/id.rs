use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Process-wide interner shared by every project session.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Identifier of a canvas component, the value of its
/// `data-component-id` marker in source. Assigned by the canvas; unique
/// within a project session. Copy, and compares as an integer.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(Spur);

impl ComponentId {
    /// Intern a marker value, reusing the id if it was seen before.
    pub fn intern(s: &str) -> Self {
        ComponentId(INTERNER.get_or_intern(s))
    }

    /// The marker value. Interned strings live for the whole process.
    pub fn as_str(&self) -> &'static str {
        INTERNER.resolve(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(s: &str) -> Self {
        Self::intern(s)
    }
}

impl fmt::Debug for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ComponentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ComponentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ComponentId::intern(&s))
    }
}
