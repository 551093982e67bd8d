pub mod controller;
pub mod search;
pub mod snapshot;
pub mod typing;
pub mod word;

pub use controller::{
    Mutation, MutationError, PronounceRequest, RemoveError, TargetWord, Trainer,
};
pub use snapshot::{TrainerSnapshot, WordDisplay};
pub use word::Word;
