use crate::types::{ContractDescriptor, FunctionDescriptor};

/// Read-only view of a loaded contract set.
///
/// Every rule reaches contract structure through this trait only. Providers must
/// return the same descriptors across calls within one run. Per-function queries
/// return `None` when the provider cannot answer; callers fall back to weaker
/// evidence instead of failing.
pub trait ContractModel {
    /// All contracts in load order.
    fn contracts(&self) -> &[ContractDescriptor];

    /// Modifier names attached to `function`.
    fn modifiers<'a>(&'a self, function: &'a FunctionDescriptor) -> Option<&'a [String]> {
        function.modifiers.as_deref()
    }

    /// Raw source text of `function`.
    fn source<'a>(&'a self, function: &'a FunctionDescriptor) -> Option<&'a str> {
        function.source.as_ref().map(|s| s.content.as_str())
    }

    /// Names of every function transitively reachable from `function`
    /// declared on `contract`.
    fn reachable_functions(
        &self,
        contract: &ContractDescriptor,
        function: &FunctionDescriptor,
    ) -> Option<Vec<String>>;

    /// Look up a contract by exact name.
    fn contract(&self, name: &str) -> Option<&ContractDescriptor> {
        self.contracts().iter().find(|c| c.name == name)
    }

    /// Contract names sorted for display.
    fn contract_names_sorted(&self) -> Vec<String> {
        let mut names: Vec<String> = self.contracts().iter().map(|c| c.name.clone()).collect();
        names.sort();
        names
    }
}
