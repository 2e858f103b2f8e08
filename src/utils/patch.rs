//! Tri-state field for partial updates.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A field of an update payload.
///
/// `Absent` means the key was not sent, `Null` means it was sent as `null`,
/// `Value` carries a new value. Pair with `#[serde(default)]` so missing keys
/// deserialize to `Absent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Patch::Null)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Patch::Absent => Patch::Absent,
            Patch::Null => Patch::Null,
            Patch::Value(value) => Patch::Value(f(value)),
        }
    }

    /// Convert the carried value, keeping `Absent` and `Null` as they are.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Patch<U>, E> {
        Ok(match self {
            Patch::Absent => Patch::Absent,
            Patch::Null => Patch::Null,
            Patch::Value(value) => Patch::Value(f(value)?),
        })
    }

    /// Overwrite `target` when a value was supplied.
    ///
    /// An explicit `null` leaves the target untouched, same as an absent key.
    pub fn merge_into<U: From<T>>(self, target: &mut U) {
        if let Patch::Value(value) = self {
            *target = U::from(value);
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Patch::Value(value) => value.serialize(serializer),
            Patch::Absent | Patch::Null => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Delta {
        name: Patch<String>,
        price: Patch<f64>,
    }

    #[test]
    fn distinguishes_missing_null_and_value() {
        let delta: Delta = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert!(delta.name.is_null());
        assert!(delta.price.is_absent());

        let delta: Delta = serde_json::from_str(r#"{"price": 12.5}"#).unwrap();
        assert!(delta.name.is_absent());
        assert_eq!(delta.price, Patch::Value(12.5));
    }

    #[test]
    fn merge_only_overwrites_on_value() {
        let mut name = String::from("Jane");
        Patch::<String>::Absent.merge_into(&mut name);
        Patch::<String>::Null.merge_into(&mut name);
        assert_eq!(name, "Jane");

        Patch::Value("Janet".to_string()).merge_into(&mut name);
        assert_eq!(name, "Janet");
    }

    #[test]
    fn merge_wraps_optional_targets() {
        let mut bio: Option<String> = Some("old".into());
        Patch::<String>::Null.merge_into(&mut bio);
        assert_eq!(bio.as_deref(), Some("old"));

        Patch::Value("new".to_string()).merge_into(&mut bio);
        assert_eq!(bio.as_deref(), Some("new"));
    }

    #[test]
    fn try_map_short_circuits_on_error() {
        let parsed: Result<Patch<i32>, String> =
            Patch::Value("x".to_string()).try_map(|raw| raw.parse().map_err(|_| raw));
        assert_eq!(parsed, Err("x".to_string()));

        let untouched: Result<Patch<i32>, String> = Patch::<String>::Null.try_map(|_| Ok(1));
        assert_eq!(untouched, Ok(Patch::Null));
    }
}
