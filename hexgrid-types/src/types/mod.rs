use serde::{Deserialize, Serialize};

mod field;

pub use field::{Field, FieldType};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub enum SourceDefinition {
    Table {
        connection: String,
        name: String,
    },
    Alias {
        name: String,
    },
    Dynamic,
}

impl Default for SourceDefinition {
    fn default() -> Self {
        SourceDefinition::Dynamic
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub struct FieldDefinition {
    pub name: String,
    pub typ: FieldType,
    pub nullable: bool,
    pub source: SourceDefinition,
}

impl FieldDefinition {
    pub fn new(name: String, typ: FieldType, nullable: bool, source: SourceDefinition) -> Self {
        Self {
            name,
            typ,
            nullable,
            source,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default, Hash)]
pub struct Schema {
    /// The list of fields a `Record` implementing this schema carries, in
    /// positional order.
    pub fields: Vec<FieldDefinition>,

    /// Indexes of the fields forming the primary key for this schema.
    pub primary_index: Vec<usize>,
}

impl Schema {
    pub fn field(&mut self, f: FieldDefinition, pk: bool) -> &mut Self {
        self.fields.push(f);
        if pk {
            self.primary_index.push(self.fields.len() - 1);
        }
        self
    }

    pub fn get_field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// The per-row binding the evaluator reads from. Valid only for the duration
/// of one evaluation call; never retained.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default, Hash)]
pub struct Record {
    /// List of values, following the definitions of `fields` of the
    /// associated schema.
    pub values: Vec<Field>,
}

impl Record {
    pub fn new(values: Vec<Field>) -> Record {
        Record { values }
    }

    pub fn nulls(size: usize) -> Record {
        Record {
            values: vec![Field::Null; size],
        }
    }

    pub fn set_value(&mut self, idx: usize, value: Field) {
        self.values[idx] = value;
    }
}
