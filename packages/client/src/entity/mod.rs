pub mod account;
pub mod category;
pub mod follow;
pub mod profile;
pub mod recipe;
pub mod recipe_comment;
pub mod recipe_like;
pub mod recipe_save;
