mod adapter_tests;
mod pricing_tests;
mod solver_tests;
