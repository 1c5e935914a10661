mod helpers;

mod code_test;
mod postgres_test;
mod voucher_test;
