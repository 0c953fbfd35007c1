use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown operation '{0}', expected letters from \"CRUD\"")]
pub struct ParseOperationsError(pub char);

/// Which of Create/Read/Update/Delete a resource supports.
///
/// Written as a letter set such as `"CRUD"` or `"RD"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CrudOperations {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub delete: bool,
}

impl CrudOperations {
    pub const ALL: CrudOperations = CrudOperations {
        create: true,
        read: true,
        update: true,
        delete: true,
    };

    pub const READ_ONLY: CrudOperations = CrudOperations {
        create: false,
        read: true,
        update: false,
        delete: false,
    };

    /// Create or update enabled: the save concern exists.
    pub fn has_save(&self) -> bool {
        self.create || self.update
    }

    pub fn has_delete(&self) -> bool {
        self.delete
    }
}

impl Default for CrudOperations {
    fn default() -> Self {
        Self::ALL
    }
}

impl FromStr for CrudOperations {
    type Err = ParseOperationsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut ops = CrudOperations {
            create: false,
            read: false,
            update: false,
            delete: false,
        };
        for c in s.chars() {
            match c.to_ascii_uppercase() {
                'C' => ops.create = true,
                'R' => ops.read = true,
                'U' => ops.update = true,
                'D' => ops.delete = true,
                _ => return Err(ParseOperationsError(c)),
            }
        }
        Ok(ops)
    }
}

impl TryFrom<String> for CrudOperations {
    type Error = ParseOperationsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for CrudOperations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (enabled, letter) in [
            (self.create, 'C'),
            (self.read, 'R'),
            (self.update, 'U'),
            (self.delete, 'D'),
        ] {
            if enabled {
                write!(f, "{}", letter)?;
            }
        }
        Ok(())
    }
}

impl From<CrudOperations> for String {
    fn from(ops: CrudOperations) -> Self {
        ops.to_string()
    }
}
