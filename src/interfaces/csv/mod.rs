pub mod account_writer;
