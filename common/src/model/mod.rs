pub mod datasource;
pub mod flash;
pub mod mapping;
pub mod payload;
pub mod persisted;
pub mod question;
pub mod row;
pub mod selection;
pub mod settings;
