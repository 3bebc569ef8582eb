pub mod commitment;
pub mod pow_poly;
pub mod unipoly;
