pub mod common;
mod encode;
mod grid;
mod inspect;
mod traverse;
