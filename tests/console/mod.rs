mod common;
mod completion_test;
mod dispatch_test;
mod headless_test;
mod help_test;
