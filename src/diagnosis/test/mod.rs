mod service_test;
