pub mod ipa;
pub mod kzg;
pub mod shplemini;
pub mod srs;
