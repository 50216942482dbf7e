//! Column-to-field mapping for the bulk application importer.
//!
//! An operator maps every logical application field either to a column of
//! the uploaded spreadsheet or to a fixed literal applied to every row. The
//! set of fields is closed: [`ApplicationImportMapping`] has one named rule
//! per field, so a mapping can never miss or invent a key.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// The logical application fields an import row provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportField {
    Client,
    Project,
    Runtime,
    Pool,
    Domains,
    Framework,
    Database,
    DatabaseName,
    DatabaseUser,
    DocRoot,
    Repository,
    Branch,
}

impl ImportField {
    /// Every field, in the order the mapping form presents them.
    pub const ALL: [ImportField; 12] = [
        Self::Client,
        Self::Project,
        Self::Runtime,
        Self::Pool,
        Self::Domains,
        Self::Framework,
        Self::Database,
        Self::DatabaseName,
        Self::DatabaseUser,
        Self::DocRoot,
        Self::Repository,
        Self::Branch,
    ];

    /// Field name as used in forms and JSON payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Project => "project",
            Self::Runtime => "runtime",
            Self::Pool => "pool",
            Self::Domains => "domains",
            Self::Framework => "framework",
            Self::Database => "database",
            Self::DatabaseName => "database_name",
            Self::DatabaseUser => "database_user",
            Self::DocRoot => "doc_root",
            Self::Repository => "repository",
            Self::Branch => "branch",
        }
    }
}

impl std::fmt::Display for ImportField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// How one field's value is obtained for every row of a batch.
///
/// Serialized as `{"column": 3}` or `{"literal": "php"}`. The mapping form's
/// flat shape `{"column_index": -1, "custom_value": "php"}` is accepted on
/// input as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "RuleRepr")]
pub enum MappingRule {
    /// Take the cell at this zero-based column index.
    Column(usize),
    /// Use this fixed value for every row.
    Literal(String),
}

impl Default for MappingRule {
    fn default() -> Self {
        Self::Literal(String::new())
    }
}

impl MappingRule {
    /// Build a rule from the mapping form's flat fields.
    ///
    /// A negative `column_index` (the form sends `-1`) selects the literal;
    /// otherwise the column wins and `custom_value` is ignored.
    pub fn from_form(column_index: i64, custom_value: impl Into<String>) -> Self {
        match usize::try_from(column_index) {
            Ok(index) => Self::Column(index),
            Err(_) => Self::Literal(custom_value.into()),
        }
    }

    /// Column index this rule reads, if it is column-sourced.
    pub fn column(&self) -> Option<usize> {
        match self {
            Self::Column(index) => Some(*index),
            Self::Literal(_) => None,
        }
    }

    /// Resolve the value for one row. Returns `None` if the column is absent.
    pub fn apply<'a>(&'a self, cells: &'a [String]) -> Option<&'a str> {
        match self {
            Self::Column(index) => cells.get(*index).map(String::as_str),
            Self::Literal(value) => Some(value.as_str()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RuleRepr {
    Column {
        column: usize,
    },
    Literal {
        literal: String,
    },
    Form {
        column_index: i64,
        #[serde(default)]
        custom_value: String,
    },
}

impl From<RuleRepr> for MappingRule {
    fn from(repr: RuleRepr) -> Self {
        match repr {
            RuleRepr::Column { column } => Self::Column(column),
            RuleRepr::Literal { literal } => Self::Literal(literal),
            RuleRepr::Form {
                column_index,
                custom_value,
            } => Self::from_form(column_index, custom_value),
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

/// One rule per logical application field.
///
/// Fields omitted from a JSON payload keep the default (empty literal);
/// unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApplicationImportMapping {
    pub client: MappingRule,
    pub project: MappingRule,
    pub runtime: MappingRule,
    pub pool: MappingRule,
    pub domains: MappingRule,
    pub framework: MappingRule,
    pub database: MappingRule,
    pub database_name: MappingRule,
    pub database_user: MappingRule,
    pub doc_root: MappingRule,
    pub repository: MappingRule,
    pub branch: MappingRule,
}

impl ApplicationImportMapping {
    /// A mapping with every field set to an empty literal.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(&self, field: ImportField) -> &MappingRule {
        match field {
            ImportField::Client => &self.client,
            ImportField::Project => &self.project,
            ImportField::Runtime => &self.runtime,
            ImportField::Pool => &self.pool,
            ImportField::Domains => &self.domains,
            ImportField::Framework => &self.framework,
            ImportField::Database => &self.database,
            ImportField::DatabaseName => &self.database_name,
            ImportField::DatabaseUser => &self.database_user,
            ImportField::DocRoot => &self.doc_root,
            ImportField::Repository => &self.repository,
            ImportField::Branch => &self.branch,
        }
    }

    pub fn rule_mut(&mut self, field: ImportField) -> &mut MappingRule {
        match field {
            ImportField::Client => &mut self.client,
            ImportField::Project => &mut self.project,
            ImportField::Runtime => &mut self.runtime,
            ImportField::Pool => &mut self.pool,
            ImportField::Domains => &mut self.domains,
            ImportField::Framework => &mut self.framework,
            ImportField::Database => &mut self.database,
            ImportField::DatabaseName => &mut self.database_name,
            ImportField::DatabaseUser => &mut self.database_user,
            ImportField::DocRoot => &mut self.doc_root,
            ImportField::Repository => &mut self.repository,
            ImportField::Branch => &mut self.branch,
        }
    }

    /// Replace the rule for `field`, returning `self` for chaining.
    pub fn with(mut self, field: ImportField, rule: MappingRule) -> Self {
        *self.rule_mut(field) = rule;
        self
    }

    /// Iterate `(field, rule)` pairs in [`ImportField::ALL`] order.
    pub fn rules(&self) -> impl Iterator<Item = (ImportField, &MappingRule)> {
        ImportField::ALL.into_iter().map(move |f| (f, self.rule(f)))
    }

    /// Highest column index any rule reads, or `None` if all are literals.
    pub fn max_column(&self) -> Option<usize> {
        self.rules().filter_map(|(_, rule)| rule.column()).max()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
