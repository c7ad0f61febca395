pub mod script_worker;
