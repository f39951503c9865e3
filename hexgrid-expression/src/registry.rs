use crate::cell::common::CellFunctionType;
use crate::error::Error;
use hexgrid_types::indexmap::IndexMap;
use hexgrid_types::log::debug;

/// The macro table the parser resolves function-call syntax through. Built
/// once at process start; a name collision is a configuration error there
/// and then, never a silent overwrite at first use.
///
/// Serialization uses the same names: each `CellFunctionType` variant's serde
/// tag is its registry key, so parse-time and deserialize-time resolution
/// cannot drift apart.
#[derive(Clone, Debug, Default)]
pub struct FunctionRegistry {
    functions: IndexMap<String, CellFunctionType>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the whole built-in catalog.
    pub fn with_builtin_functions() -> Result<Self, Error> {
        let mut registry = Self::new();
        for fun in CellFunctionType::ALL {
            registry.register(fun)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, fun: CellFunctionType) -> Result<(), Error> {
        let name = fun.to_string();
        if self.functions.contains_key(&name) {
            return Err(Error::DuplicateFunctionName(name));
        }
        debug!("registered scalar function {name}");
        self.functions.insert(name, fun);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<CellFunctionType> {
        self.functions.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexgrid_types::serde_json;

    #[test]
    fn test_builtin_catalog_registers_six_functions() {
        let registry = FunctionRegistry::with_builtin_functions().unwrap();
        assert_eq!(registry.names().count(), 6);
        assert_eq!(
            registry.lookup("h3_latlng_to_cell"),
            Some(CellFunctionType::LatLngToCell)
        );
        assert_eq!(registry.lookup("no_such_function"), None);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = FunctionRegistry::with_builtin_functions().unwrap();
        let result = registry.register(CellFunctionType::GridRing);
        assert!(matches!(result, Err(Error::DuplicateFunctionName(name)) if name == "h3_grid_ring"));
        // The original entry survives.
        assert_eq!(
            registry.lookup("h3_grid_ring"),
            Some(CellFunctionType::GridRing)
        );
    }

    #[test]
    fn test_registry_keys_match_serialization_tags() {
        let registry = FunctionRegistry::with_builtin_functions().unwrap();
        for name in registry.names() {
            let fun = registry.lookup(name).unwrap();
            let tag = serde_json::to_value(fun).unwrap();
            assert_eq!(tag, serde_json::Value::String(name.to_string()));
        }
    }
}
