//! Enum name tables.
//!
//! Each enum type used by a layout is described by one static [`EnumTable`]
//! mapping integer codes to their symbolic names. Tables are plain data
//! built at compile time and never mutated.

/// Code of the sentinel every table declares for values it does not know.
pub const UNRECOGNIZED: i32 = -1;

/// Name of the [`UNRECOGNIZED`] sentinel.
pub const UNRECOGNIZED_NAME: &str = "UNRECOGNIZED";

/// Reversible integer ↔ name mapping for one enum type.
///
/// # Example
///
/// ```
/// use wirecodec::EnumTable;
///
/// static SIDE: EnumTable = EnumTable::new(
///     "example.Side",
///     &[(0, "BUY"), (1, "SELL"), (-1, "UNRECOGNIZED")],
/// );
///
/// assert_eq!(SIDE.name_from_code(1), Some("SELL"));
/// assert_eq!(SIDE.code_from_name("BUY"), Some(0));
/// assert_eq!(SIDE.name_from_code(7), None);
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct EnumTable {
    /// Fully-qualified enum type name.
    pub name: &'static str,
    /// Declared `(code, name)` pairs.
    pub values: &'static [(i32, &'static str)],
}

impl EnumTable {
    pub const fn new(name: &'static str, values: &'static [(i32, &'static str)]) -> Self {
        Self { name, values }
    }

    /// Symbolic name of `code`, or `None` if the code is not declared.
    pub fn name_from_code(&self, code: i32) -> Option<&'static str> {
        self.values
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, name)| *name)
    }

    /// Integer code of `name`, or `None` if the name is not declared.
    pub fn code_from_name(&self, name: &str) -> Option<i32> {
        self.values
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(code, _)| *code)
    }

    pub fn is_declared(&self, code: i32) -> bool {
        self.name_from_code(code).is_some()
    }

    pub fn codes(&self) -> impl Iterator<Item = i32> + '_ {
        self.values.iter().map(|(code, _)| *code)
    }

    /// Checks that codes and names are unique and the sentinel is present.
    pub fn validate(&self) -> Result<(), String> {
        for (i, (code, name)) in self.values.iter().enumerate() {
            for (other_code, other_name) in &self.values[i + 1..] {
                if code == other_code {
                    return Err(format!("duplicate code {code} in enum {}", self.name));
                }
                if name == other_name {
                    return Err(format!("duplicate name {name} in enum {}", self.name));
                }
            }
        }
        if self.name_from_code(UNRECOGNIZED) != Some(UNRECOGNIZED_NAME) {
            return Err(format!(
                "enum {} does not declare {UNRECOGNIZED_NAME} = {UNRECOGNIZED}",
                self.name
            ));
        }
        Ok(())
    }
}
