pub mod economy;
