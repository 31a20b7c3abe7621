#![no_std]

pub mod bitmap;
pub mod decode;
pub mod encode;
pub mod options;
pub mod packer;
pub mod padding;
pub mod threshold;

extern crate alloc;
