pub mod logging;

// Encounter turn order: creatures, ordering, cursor, mutations, persistence
pub mod initiative;
