use super::EntityMetadata;

/// Aggregate root contract
pub trait AggregateRoot {
    type Id;

    fn id(&self) -> Self::Id;

    /// Business code of the record (e.g. "RCP-20250301-1A2B3C4D")
    fn code(&self) -> &str;

    fn metadata(&self) -> &EntityMetadata;

    fn metadata_mut(&mut self) -> &mut EntityMetadata;
}
