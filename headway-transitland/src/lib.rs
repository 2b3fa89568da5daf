pub mod transitland;
