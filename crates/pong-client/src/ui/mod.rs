pub mod effects;
pub mod highscores;
