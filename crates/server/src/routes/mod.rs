pub mod catalog;
pub mod home;
pub mod library;
pub mod movies;
pub mod settings;
