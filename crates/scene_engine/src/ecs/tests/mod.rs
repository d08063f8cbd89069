//! Component store behaviour across lifecycles and views

mod views;
