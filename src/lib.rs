//! Single-elimination draw engine: library with models, draw logic and bracket persistence.

pub mod config;
pub mod logic;
pub mod models;
pub mod roster;
pub mod store;

pub use config::{ConfigError, EngineConfig};
pub use logic::{
    assign_courts, build_topology, fill_slots, generate_bracket, inject_bronze_match,
    order_competitors,
};
pub use models::{
    Bracket, BracketError, BracketShape, ClubId, Competitor, CompetitorId, Court, Match, MatchRef,
    MatchStatus, Slot, Stage,
};
pub use roster::{read_roster, RosterError};
pub use store::{
    BracketStore, CompetitionId, DrawId, JsonFileBracketStore, MemoryBracketStore, PendingDraws,
    StoreError, StoredBracket,
};
