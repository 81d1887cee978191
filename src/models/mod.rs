pub mod requests;
pub mod responses;

pub use requests::GuessRequest;
pub use responses::{
    ErrorResponse, GameStateResponse, GuessResponse, StartGameResponse, ALREADY_GUESSED_MESSAGE,
};
