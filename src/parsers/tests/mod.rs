mod html_tests;
