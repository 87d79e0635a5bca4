pub mod content;
pub mod db;
pub mod mail;
pub mod password;
pub mod storage;
