pub mod changelog;
