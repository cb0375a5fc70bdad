mod exp;
mod ln;
mod trig;

pub use exp::{exp, pow};
pub use ln::ln;
pub use trig::{asin, acos, atan, sin_cos, trig_prep};

use crate::bcd::Bcd;
use lazy_static::lazy_static;
use std::str::FromStr;
use tracing::debug;

/// Entries in the CORDIC log table.
pub const LOG_TABLE_LEN: usize = 114;
/// Entries in the CORDIC trig table.
pub const TRIG_TABLE_LEN: usize = 113;

/// Digits per unpacked table entry: two integer digits plus 32 decimals.
const ENTRY_DIGITS: usize = 34;

/// Starting point for the trig rotations: the reciprocal of the product of
/// all rotation gains, so the final vector comes out unit length.
pub const K: &str = "0.60725293500888125616944675250493";
/// ln 10, converts natural logs to base ten.
pub const LOG10_FACTOR: &str = "2.30258509299404568401799145468437";
pub const PI: &str = "3.1415926535897932384626433832795";
#[allow(dead_code)]
pub const PI_2: &str = "1.57079632679489661923132169163975";
/// Degrees per radian.
pub const DEG_FACTOR: &str = "57.29577951308232087679815481410522";
/// Radians per degree.
#[allow(dead_code)]
pub const RAD_FACTOR: &str = "0.01745329251994329576923690768489";

// Both tables, packed: each row is a digit-pair count followed by that many
// bytes of two BCD nibbles; rows shorter than 17 pairs owe leading zero
// pairs. A zero count terminates the image.
#[rustfmt::skip]
static PACKED_TABLES: &[u8] = &[
    // natural log arguments: ln(2^128) .. ln(2^2), then ln(1 + 2^-k)
    17, 0x88, 0x72, 0x28, 0x39, 0x11, 0x16, 0x72, 0x99, 0x96, 0x05, 0x40, 0x57, 0x11, 0x54, 0x66, 0x46, 0x60,
    17, 0x44, 0x36, 0x14, 0x19, 0x55, 0x58, 0x36, 0x49, 0x98, 0x02, 0x70, 0x28, 0x55, 0x77, 0x33, 0x23, 0x30,
    17, 0x22, 0x18, 0x07, 0x09, 0x77, 0x79, 0x18, 0x24, 0x99, 0x01, 0x35, 0x14, 0x27, 0x88, 0x66, 0x61, 0x65,
    17, 0x11, 0x09, 0x03, 0x54, 0x88, 0x89, 0x59, 0x12, 0x49, 0x50, 0x67, 0x57, 0x13, 0x94, 0x33, 0x30, 0x83,
    17, 0x05, 0x54, 0x51, 0x77, 0x44, 0x44, 0x79, 0x56, 0x24, 0x75, 0x33, 0x78, 0x56, 0x97, 0x16, 0x65, 0x41,
    17, 0x02, 0x77, 0x25, 0x88, 0x72, 0x22, 0x39, 0x78, 0x12, 0x37, 0x66, 0x89, 0x28, 0x48, 0x58, 0x32, 0x71,
    17, 0x01, 0x38, 0x62, 0x94, 0x36, 0x11, 0x19, 0x89, 0x06, 0x18, 0x83, 0x44, 0x64, 0x24, 0x29, 0x16, 0x35,
    16, 0x69, 0x31, 0x47, 0x18, 0x05, 0x59, 0x94, 0x53, 0x09, 0x41, 0x72, 0x32, 0x12, 0x14, 0x58, 0x18,
    16, 0x40, 0x54, 0x65, 0x10, 0x81, 0x08, 0x16, 0x43, 0x81, 0x97, 0x80, 0x13, 0x11, 0x54, 0x64, 0x35,
    16, 0x22, 0x31, 0x43, 0x55, 0x13, 0x14, 0x20, 0x97, 0x55, 0x76, 0x62, 0x95, 0x09, 0x03, 0x09, 0x83,
    16, 0x11, 0x77, 0x83, 0x03, 0x56, 0x56, 0x38, 0x34, 0x54, 0x53, 0x87, 0x94, 0x10, 0x94, 0x70, 0x52,
    16, 0x06, 0x06, 0x24, 0x62, 0x18, 0x16, 0x43, 0x48, 0x42, 0x58, 0x06, 0x06, 0x13, 0x20, 0x40, 0x42,
    16, 0x03, 0x07, 0x71, 0x65, 0x86, 0x66, 0x75, 0x36, 0x88, 0x37, 0x10, 0x28, 0x20, 0x75, 0x96, 0x77,
    16, 0x01, 0x55, 0x04, 0x18, 0x65, 0x35, 0x96, 0x52, 0x54, 0x15, 0x08, 0x54, 0x04, 0x60, 0x42, 0x45,
    15, 0x77, 0x82, 0x14, 0x04, 0x42, 0x05, 0x49, 0x48, 0x94, 0x74, 0x62, 0x90, 0x00, 0x61, 0x14,
    15, 0x38, 0x98, 0x64, 0x04, 0x15, 0x65, 0x73, 0x23, 0x01, 0x39, 0x37, 0x34, 0x30, 0x95, 0x84,
    15, 0x19, 0x51, 0x22, 0x01, 0x31, 0x26, 0x17, 0x49, 0x43, 0x96, 0x74, 0x04, 0x95, 0x31, 0x84,
    15, 0x09, 0x76, 0x08, 0x59, 0x73, 0x05, 0x54, 0x58, 0x89, 0x59, 0x60, 0x82, 0x49, 0x08, 0x02,
    15, 0x04, 0x88, 0x16, 0x20, 0x79, 0x50, 0x13, 0x51, 0x18, 0x85, 0x37, 0x04, 0x96, 0x92, 0x65,
    15, 0x02, 0x44, 0x11, 0x08, 0x27, 0x52, 0x73, 0x62, 0x70, 0x91, 0x60, 0x47, 0x90, 0x85, 0x82,
    15, 0x01, 0x22, 0x06, 0x28, 0x62, 0x52, 0x56, 0x77, 0x37, 0x16, 0x23, 0x05, 0x53, 0x67, 0x16,
    14, 0x61, 0x03, 0x32, 0x93, 0x68, 0x06, 0x38, 0x52, 0x49, 0x13, 0x15, 0x87, 0x89, 0x65,
    14, 0x30, 0x51, 0x71, 0x12, 0x47, 0x31, 0x86, 0x37, 0x85, 0x69, 0x06, 0x95, 0x14, 0x17,
    14, 0x15, 0x25, 0x86, 0x72, 0x64, 0x83, 0x62, 0x39, 0x74, 0x05, 0x75, 0x73, 0x25, 0x13,
    14, 0x07, 0x62, 0x93, 0x65, 0x42, 0x75, 0x67, 0x57, 0x21, 0x55, 0x88, 0x52, 0x96, 0x85,
    14, 0x03, 0x81, 0x46, 0x89, 0x98, 0x96, 0x85, 0x88, 0x94, 0x80, 0x71, 0x17, 0x84, 0x98,
    14, 0x01, 0x90, 0x73, 0x46, 0x81, 0x38, 0x25, 0x40, 0x94, 0x15, 0x46, 0x94, 0x42, 0x51,
    13, 0x95, 0x36, 0x73, 0x86, 0x16, 0x59, 0x18, 0x82, 0x33, 0x90, 0x84, 0x15, 0x51,
    13, 0x47, 0x68, 0x37, 0x04, 0x45, 0x16, 0x32, 0x34, 0x18, 0x44, 0x34, 0x61, 0x75,
    13, 0x23, 0x84, 0x18, 0x55, 0x06, 0x79, 0x85, 0x75, 0x87, 0x10, 0x42, 0x36, 0x79,
    13, 0x11, 0x92, 0x09, 0x28, 0x24, 0x45, 0x35, 0x44, 0x57, 0x08, 0x75, 0x79, 0x16,
    13, 0x05, 0x96, 0x04, 0x64, 0x29, 0x99, 0x03, 0x38, 0x56, 0x18, 0x58, 0x25, 0x32,
    13, 0x02, 0x98, 0x02, 0x32, 0x19, 0x43, 0x60, 0x61, 0x11, 0x47, 0x31, 0x97, 0x05,
    13, 0x01, 0x49, 0x01, 0x16, 0x10, 0x82, 0x82, 0x53, 0x54, 0x89, 0x03, 0x91, 0x82,
    12, 0x74, 0x50, 0x58, 0x05, 0x69, 0x16, 0x82, 0x52, 0x64, 0x72, 0x34, 0x52,
    12, 0x37, 0x25, 0x29, 0x02, 0x91, 0x52, 0x30, 0x20, 0x17, 0x58, 0x25, 0x70,
    12, 0x18, 0x62, 0x64, 0x51, 0x47, 0x49, 0x62, 0x33, 0x55, 0x74, 0x27, 0x31,
    12, 0x09, 0x31, 0x32, 0x25, 0x74, 0x18, 0x17, 0x97, 0x64, 0x69, 0x00, 0x06,
    12, 0x04, 0x65, 0x66, 0x12, 0x87, 0x19, 0x93, 0x19, 0x04, 0x05, 0x97, 0x61,
    12, 0x02, 0x32, 0x83, 0x06, 0x43, 0x62, 0x67, 0x64, 0x57, 0x45, 0x98, 0x32,
    12, 0x01, 0x16, 0x41, 0x53, 0x21, 0x82, 0x01, 0x58, 0x55, 0x08, 0x75, 0x62,
    11, 0x58, 0x20, 0x76, 0x60, 0x91, 0x17, 0x73, 0x34, 0x13, 0x32, 0x12,
    11, 0x29, 0x10, 0x38, 0x30, 0x45, 0x63, 0x10, 0x18, 0x71, 0x39, 0x66,
    11, 0x14, 0x55, 0x19, 0x15, 0x22, 0x82, 0x60, 0x97, 0x26, 0x88, 0x23,
    11, 0x07, 0x27, 0x59, 0x57, 0x61, 0x41, 0x56, 0x95, 0x61, 0x23, 0x72,
    11, 0x03, 0x63, 0x79, 0x78, 0x80, 0x70, 0x85, 0x09, 0x55, 0x06, 0x76,
    11, 0x01, 0x81, 0x89, 0x89, 0x40, 0x35, 0x44, 0x20, 0x21, 0x14, 0x60,
    10, 0x90, 0x94, 0x94, 0x70, 0x17, 0x72, 0x51, 0x46, 0x47, 0x61,
    10, 0x45, 0x47, 0x47, 0x35, 0x08, 0x86, 0x36, 0x07, 0x21, 0x38,
    10, 0x22, 0x73, 0x73, 0x67, 0x54, 0x43, 0x20, 0x62, 0x10, 0x08,
    10, 0x11, 0x36, 0x86, 0x83, 0x77, 0x21, 0x60, 0x95, 0x67, 0x39,
    10, 0x05, 0x68, 0x43, 0x41, 0x88, 0x60, 0x80, 0x63, 0x99, 0x28,
    10, 0x02, 0x84, 0x21, 0x70, 0x94, 0x30, 0x40, 0x36, 0x03, 0x54,
    10, 0x01, 0x42, 0x10, 0x85, 0x47, 0x15, 0x20, 0x19, 0x02, 0x74,
     9, 0x71, 0x05, 0x42, 0x73, 0x57, 0x60, 0x09, 0x76, 0x61,
     9, 0x35, 0x52, 0x71, 0x36, 0x78, 0x80, 0x04, 0x94, 0x62,
     9, 0x17, 0x76, 0x35, 0x68, 0x39, 0x40, 0x02, 0x48, 0x89,
     9, 0x08, 0x88, 0x17, 0x84, 0x19, 0x70, 0x01, 0x24, 0x84,
     9, 0x04, 0x44, 0x08, 0x92, 0x09, 0x85, 0x00, 0x62, 0x52,
     9, 0x02, 0x22, 0x04, 0x46, 0x04, 0x92, 0x50, 0x31, 0x28,
     9, 0x01, 0x11, 0x02, 0x23, 0x02, 0x46, 0x25, 0x15, 0x65,
     8, 0x55, 0x51, 0x11, 0x51, 0x23, 0x12, 0x57, 0x83,
     8, 0x27, 0x75, 0x55, 0x75, 0x61, 0x56, 0x28, 0x91,
     8, 0x13, 0x87, 0x77, 0x87, 0x80, 0x78, 0x14, 0x46,
     8, 0x06, 0x93, 0x88, 0x93, 0x90, 0x39, 0x07, 0x23,
     8, 0x03, 0x46, 0x94, 0x46, 0x95, 0x19, 0x53, 0x61,
     8, 0x01, 0x73, 0x47, 0x23, 0x47, 0x59, 0x76, 0x81,
     7, 0x86, 0x73, 0x61, 0x73, 0x79, 0x88, 0x40,
     7, 0x43, 0x36, 0x80, 0x86, 0x89, 0x94, 0x20,
     7, 0x21, 0x68, 0x40, 0x43, 0x44, 0x97, 0x10,
     7, 0x10, 0x84, 0x20, 0x21, 0x72, 0x48, 0x55,
     7, 0x05, 0x42, 0x10, 0x10, 0x86, 0x24, 0x27,
     7, 0x02, 0x71, 0x05, 0x05, 0x43, 0x12, 0x14,
     7, 0x01, 0x35, 0x52, 0x52, 0x71, 0x56, 0x07,
     6, 0x67, 0x76, 0x26, 0x35, 0x78, 0x03,
     6, 0x33, 0x88, 0x13, 0x17, 0x89, 0x02,
     6, 0x16, 0x94, 0x06, 0x58, 0x94, 0x51,
     6, 0x08, 0x47, 0x03, 0x29, 0x47, 0x25,
     6, 0x04, 0x23, 0x51, 0x64, 0x73, 0x63,
     6, 0x02, 0x11, 0x75, 0x82, 0x36, 0x81,
     6, 0x01, 0x05, 0x87, 0x91, 0x18, 0x41,
     5, 0x52, 0x93, 0x95, 0x59, 0x20,
     5, 0x26, 0x46, 0x97, 0x79, 0x60,
     5, 0x13, 0x23, 0x48, 0x89, 0x80,
     5, 0x06, 0x61, 0x74, 0x44, 0x90,
     5, 0x03, 0x30, 0x87, 0x22, 0x45,
     5, 0x01, 0x65, 0x43, 0x61, 0x22,
     4, 0x82, 0x71, 0x80, 0x61,
     4, 0x41, 0x35, 0x90, 0x31,
     4, 0x20, 0x67, 0x95, 0x15,
     4, 0x10, 0x33, 0x97, 0x58,
     4, 0x05, 0x16, 0x98, 0x79,
     4, 0x02, 0x58, 0x49, 0x39,
     4, 0x01, 0x29, 0x24, 0x70,
     3, 0x64, 0x62, 0x35,
     3, 0x32, 0x31, 0x17,
     3, 0x16, 0x15, 0x59,
     3, 0x08, 0x07, 0x79,
     3, 0x04, 0x03, 0x90,
     3, 0x02, 0x01, 0x95,
     3, 0x01, 0x00, 0x97,
     2, 0x50, 0x49,
     2, 0x25, 0x24,
     2, 0x12, 0x62,
     2, 0x06, 0x31,
     2, 0x03, 0x15,
     2, 0x01, 0x58,
     1, 0x79,
     1, 0x39,
     1, 0x20,
     1, 0x10,
     1, 0x05,
     1, 0x02,
     1, 0x01,
    // arctangents of 2^-k, in degrees
    17, 0x45, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    17, 0x26, 0x56, 0x50, 0x51, 0x17, 0x70, 0x77, 0x98, 0x93, 0x51, 0x57, 0x21, 0x93, 0x72, 0x04, 0x53, 0x29,
    17, 0x14, 0x03, 0x62, 0x43, 0x46, 0x79, 0x26, 0x47, 0x85, 0x82, 0x89, 0x23, 0x20, 0x15, 0x91, 0x63, 0x42,
    17, 0x07, 0x12, 0x50, 0x16, 0x34, 0x89, 0x01, 0x79, 0x75, 0x61, 0x95, 0x33, 0x00, 0x84, 0x12, 0x06, 0x84,
    17, 0x03, 0x57, 0x63, 0x34, 0x37, 0x49, 0x97, 0x35, 0x10, 0x30, 0x68, 0x47, 0x78, 0x91, 0x44, 0x58, 0x82,
    17, 0x01, 0x78, 0x99, 0x10, 0x60, 0x82, 0x46, 0x06, 0x93, 0x07, 0x15, 0x02, 0x49, 0x77, 0x60, 0x79, 0x09,
    16, 0x89, 0x51, 0x73, 0x71, 0x02, 0x11, 0x07, 0x43, 0x13, 0x64, 0x12, 0x16, 0x82, 0x30, 0x79, 0x53,
    16, 0x44, 0x76, 0x14, 0x17, 0x08, 0x60, 0x55, 0x30, 0x73, 0x09, 0x43, 0x53, 0x82, 0x54, 0x23, 0x82,
    16, 0x22, 0x38, 0x10, 0x50, 0x03, 0x68, 0x53, 0x80, 0x75, 0x12, 0x35, 0x33, 0x54, 0x24, 0x30, 0x59,
    16, 0x11, 0x19, 0x05, 0x67, 0x70, 0x66, 0x20, 0x68, 0x87, 0x27, 0x54, 0x75, 0x79, 0x70, 0x34, 0x72,
    16, 0x05, 0x59, 0x52, 0x89, 0x18, 0x93, 0x80, 0x36, 0x68, 0x17, 0x44, 0x24, 0x13, 0x44, 0x04, 0x23,
    16, 0x02, 0x79, 0x76, 0x45, 0x26, 0x17, 0x00, 0x36, 0x74, 0x59, 0x91, 0x79, 0x11, 0x92, 0x36, 0x83,
    16, 0x01, 0x39, 0x88, 0x22, 0x71, 0x42, 0x26, 0x50, 0x14, 0x62, 0x86, 0x87, 0x63, 0x57, 0x24, 0x36,
    15, 0x69, 0x94, 0x11, 0x36, 0x75, 0x35, 0x29, 0x18, 0x45, 0x75, 0x24, 0x89, 0x32, 0x87, 0x82,
    15, 0x34, 0x97, 0x05, 0x68, 0x50, 0x70, 0x40, 0x11, 0x05, 0x84, 0x42, 0x77, 0x35, 0x40, 0x77,
    15, 0x17, 0x48, 0x52, 0x84, 0x26, 0x98, 0x04, 0x49, 0x52, 0x15, 0x80, 0x88, 0x73, 0x44, 0x18,
    15, 0x08, 0x74, 0x26, 0x42, 0x13, 0x69, 0x37, 0x80, 0x26, 0x02, 0x61, 0x92, 0x68, 0x64, 0x27,
    15, 0x04, 0x37, 0x13, 0x21, 0x06, 0x87, 0x23, 0x34, 0x56, 0x75, 0x78, 0x22, 0x83, 0x81, 0x83,
    15, 0x02, 0x18, 0x56, 0x60, 0x53, 0x43, 0x93, 0x47, 0x83, 0x84, 0x70, 0x43, 0x88, 0x58, 0x09,
    15, 0x01, 0x09, 0x28, 0x30, 0x26, 0x72, 0x00, 0x71, 0x48, 0x85, 0x70, 0x39, 0x80, 0x29, 0x58,
    14, 0x54, 0x64, 0x15, 0x13, 0x36, 0x00, 0x85, 0x44, 0x04, 0x52, 0x09, 0x67, 0x46, 0x64,
    14, 0x27, 0x32, 0x07, 0x56, 0x68, 0x00, 0x48, 0x93, 0x22, 0x46, 0x91, 0x06, 0x02, 0x51,
    14, 0x13, 0x66, 0x03, 0x78, 0x34, 0x00, 0x25, 0x24, 0x26, 0x26, 0x06, 0x30, 0x80, 0x30,
    14, 0x06, 0x83, 0x01, 0x89, 0x17, 0x00, 0x12, 0x71, 0x83, 0x75, 0x85, 0x75, 0x12, 0x55,
    14, 0x03, 0x41, 0x50, 0x94, 0x58, 0x50, 0x06, 0x37, 0x13, 0x20, 0x78, 0x20, 0x02, 0x82,
    14, 0x01, 0x70, 0x75, 0x47, 0x29, 0x25, 0x03, 0x18, 0x71, 0x76, 0x99, 0x76, 0x57, 0x23,
    13, 0x85, 0x37, 0x73, 0x64, 0x62, 0x51, 0x59, 0x37, 0x78, 0x07, 0x46, 0x60, 0x59,
    13, 0x42, 0x68, 0x86, 0x82, 0x31, 0x25, 0x79, 0x69, 0x12, 0x73, 0x43, 0x09, 0x29,
    13, 0x21, 0x34, 0x43, 0x41, 0x15, 0x62, 0x89, 0x84, 0x59, 0x32, 0x92, 0x77, 0x02,
    13, 0x10, 0x67, 0x21, 0x70, 0x57, 0x81, 0x44, 0x92, 0x30, 0x03, 0x49, 0x03, 0x81,
    13, 0x05, 0x33, 0x60, 0x85, 0x28, 0x90, 0x72, 0x46, 0x15, 0x06, 0x37, 0x35, 0x07,
    13, 0x02, 0x66, 0x80, 0x42, 0x64, 0x45, 0x36, 0x23, 0x07, 0x53, 0x76, 0x52, 0x93,
    13, 0x01, 0x33, 0x40, 0x21, 0x32, 0x22, 0x68, 0x11, 0x53, 0x76, 0x95, 0x49, 0x64,
    12, 0x66, 0x70, 0x10, 0x66, 0x11, 0x34, 0x05, 0x76, 0x88, 0x48, 0x65, 0x22,
    12, 0x33, 0x35, 0x05, 0x33, 0x05, 0x67, 0x02, 0x88, 0x44, 0x24, 0x43, 0x91,
    12, 0x16, 0x67, 0x52, 0x66, 0x52, 0x83, 0x51, 0x44, 0x22, 0x12, 0x23, 0x37,
    12, 0x08, 0x33, 0x76, 0x33, 0x26, 0x41, 0x75, 0x72, 0x11, 0x06, 0x11, 0x86,
    12, 0x04, 0x16, 0x88, 0x16, 0x63, 0x20, 0x87, 0x86, 0x05, 0x53, 0x05, 0x95,
    12, 0x02, 0x08, 0x44, 0x08, 0x31, 0x60, 0x43, 0x93, 0x02, 0x76, 0x52, 0x98,
    12, 0x01, 0x04, 0x22, 0x04, 0x15, 0x80, 0x21, 0x96, 0x51, 0x38, 0x26, 0x49,
    11, 0x52, 0x11, 0x02, 0x07, 0x90, 0x10, 0x98, 0x25, 0x69, 0x13, 0x24,
    11, 0x26, 0x05, 0x51, 0x03, 0x95, 0x05, 0x49, 0x12, 0x84, 0x56, 0x62,
    11, 0x13, 0x02, 0x75, 0x51, 0x97, 0x52, 0x74, 0x56, 0x42, 0x28, 0x31,
    11, 0x06, 0x51, 0x37, 0x75, 0x98, 0x76, 0x37, 0x28, 0x21, 0x14, 0x16,
    11, 0x03, 0x25, 0x68, 0x87, 0x99, 0x38, 0x18, 0x64, 0x10, 0x57, 0x08,
    11, 0x01, 0x62, 0x84, 0x43, 0x99, 0x69, 0x09, 0x32, 0x05, 0x28, 0x54,
    10, 0x81, 0x42, 0x21, 0x99, 0x84, 0x54, 0x66, 0x02, 0x64, 0x27,
    10, 0x40, 0x71, 0x10, 0x99, 0x92, 0x27, 0x33, 0x01, 0x32, 0x13,
    10, 0x20, 0x35, 0x55, 0x49, 0x96, 0x13, 0x66, 0x50, 0x66, 0x07,
    10, 0x10, 0x17, 0x77, 0x74, 0x98, 0x06, 0x83, 0x25, 0x33, 0x03,
    10, 0x05, 0x08, 0x88, 0x87, 0x49, 0x03, 0x41, 0x62, 0x66, 0x52,
    10, 0x02, 0x54, 0x44, 0x43, 0x74, 0x51, 0x70, 0x81, 0x33, 0x26,
    10, 0x01, 0x27, 0x22, 0x21, 0x87, 0x25, 0x85, 0x40, 0x66, 0x63,
     9, 0x63, 0x61, 0x10, 0x93, 0x62, 0x92, 0x70, 0x33, 0x31,
     9, 0x31, 0x80, 0x55, 0x46, 0x81, 0x46, 0x35, 0x16, 0x66,
     9, 0x15, 0x90, 0x27, 0x73, 0x40, 0x73, 0x17, 0x58, 0x33,
     9, 0x07, 0x95, 0x13, 0x86, 0x70, 0x36, 0x58, 0x79, 0x16,
     9, 0x03, 0x97, 0x56, 0x93, 0x35, 0x18, 0x29, 0x39, 0x58,
     9, 0x01, 0x98, 0x78, 0x46, 0x67, 0x59, 0x14, 0x69, 0x79,
     8, 0x99, 0x39, 0x23, 0x33, 0x79, 0x57, 0x34, 0x90,
     8, 0x49, 0x69, 0x61, 0x66, 0x89, 0x78, 0x67, 0x45,
     8, 0x24, 0x84, 0x80, 0x83, 0x44, 0x89, 0x33, 0x72,
     8, 0x12, 0x42, 0x40, 0x41, 0x72, 0x44, 0x66, 0x86,
     8, 0x06, 0x21, 0x20, 0x20, 0x86, 0x22, 0x33, 0x43,
     8, 0x03, 0x10, 0x60, 0x10, 0x43, 0x11, 0x16, 0x72,
     8, 0x01, 0x55, 0x30, 0x05, 0x21, 0x55, 0x58, 0x36,
     7, 0x77, 0x65, 0x02, 0x60, 0x77, 0x79, 0x18,
     7, 0x38, 0x82, 0x51, 0x30, 0x38, 0x89, 0x59,
     7, 0x19, 0x41, 0x25, 0x65, 0x19, 0x44, 0x79,
     7, 0x09, 0x70, 0x62, 0x82, 0x59, 0x72, 0x40,
     7, 0x04, 0x85, 0x31, 0x41, 0x29, 0x86, 0x20,
     7, 0x02, 0x42, 0x65, 0x70, 0x64, 0x93, 0x10,
     7, 0x01, 0x21, 0x32, 0x85, 0x32, 0x46, 0x55,
     6, 0x60, 0x66, 0x42, 0x66, 0x23, 0x27,
     6, 0x30, 0x33, 0x21, 0x33, 0x11, 0x64,
     6, 0x15, 0x16, 0x60, 0x66, 0x55, 0x82,
     6, 0x07, 0x58, 0x30, 0x33, 0x27, 0x91,
     6, 0x03, 0x79, 0x15, 0x16, 0x63, 0x95,
     6, 0x01, 0x89, 0x57, 0x58, 0x31, 0x98,
     5, 0x94, 0x78, 0x79, 0x15, 0x99,
     5, 0x47, 0x39, 0x39, 0x57, 0x99,
     5, 0x23, 0x69, 0x69, 0x79, 0x00,
     5, 0x11, 0x84, 0x84, 0x89, 0x50,
     5, 0x05, 0x92, 0x42, 0x44, 0x75,
     5, 0x02, 0x96, 0x21, 0x22, 0x37,
     5, 0x01, 0x48, 0x10, 0x61, 0x19,
     4, 0x74, 0x05, 0x30, 0x59,
     4, 0x37, 0x02, 0x65, 0x30,
     4, 0x18, 0x51, 0x32, 0x65,
     4, 0x09, 0x25, 0x66, 0x32,
     4, 0x04, 0x62, 0x83, 0x16,
     4, 0x02, 0x31, 0x41, 0x58,
     4, 0x01, 0x15, 0x70, 0x79,
     3, 0x57, 0x85, 0x40,
     3, 0x28, 0x92, 0x70,
     3, 0x14, 0x46, 0x35,
     3, 0x07, 0x23, 0x17,
     3, 0x03, 0x61, 0x59,
     3, 0x01, 0x80, 0x79,
     2, 0x90, 0x40,
     2, 0x45, 0x20,
     2, 0x22, 0x60,
     2, 0x11, 0x30,
     2, 0x05, 0x65,
     2, 0x02, 0x82,
     2, 0x01, 0x41,
     1, 0x71,
     1, 0x35,
     1, 0x18,
     1, 0x09,
     1, 0x04,
     1, 0x02,
     1, 0x01,
    0,
];

fn unpack_entries(start: usize, count: usize) -> (Vec<Bcd>, usize) {
    let mut entries = Vec::with_capacity(count);
    let mut ptr = start;
    for _ in 0..count {
        let pairs = PACKED_TABLES[ptr] as usize;
        ptr += 1;
        let mut entry = Bcd::zero();
        entry.len = ENTRY_DIGITS;
        entry.dec = 2;
        let mut d = 2 * (17 - pairs);
        for _ in 0..pairs {
            let byte = PACKED_TABLES[ptr];
            ptr += 1;
            entry.digits[d] = byte >> 4;
            entry.digits[d + 1] = byte & 0xF;
            d += 2;
        }
        entries.push(entry);
    }
    (entries, ptr)
}

fn unpack_tables() -> (Vec<Bcd>, Vec<Bcd>) {
    let (logs, next) = unpack_entries(0, LOG_TABLE_LEN);
    let (trig, end) = unpack_entries(next, TRIG_TABLE_LEN);
    debug_assert_eq!(PACKED_TABLES[end], 0);
    debug!(
        logs = logs.len(),
        trig = trig.len(),
        "unpacked CORDIC tables"
    );
    (logs, trig)
}

lazy_static! {
    static ref TABLES: (Vec<Bcd>, Vec<Bcd>) = unpack_tables();
}

/// Log-table entry `i`, truncated to the working precision.
pub fn log_entry(i: usize, dec_places: usize) -> Bcd {
    let mut e = TABLES.0[i].clone();
    e.len = 2 + dec_places;
    e
}

/// Trig-table entry `i`, truncated to the working precision.
pub fn trig_entry(i: usize, dec_places: usize) -> Bcd {
    let mut e = TABLES.1[i].clone();
    e.len = 2 + dec_places;
    e
}

/// Effective iteration counts at `dec_places`: each table is usable up to
/// its first entry that truncates to all zeros.
pub fn table_sizes(dec_places: usize) -> (usize, usize) {
    let working = 2 + dec_places;
    let zero_at = |entries: &[Bcd]| {
        entries
            .iter()
            .position(|e| e.digits[..working].iter().all(|&d| d == 0))
            .unwrap_or(entries.len())
    };
    (zero_at(&TABLES.0), zero_at(&TABLES.1))
}

fn constant(text: &str) -> Bcd {
    Bcd::from_str(text).expect("bad built-in constant")
}

/// K truncated to the working precision, seeding the cosine accumulator.
pub fn k_seed(dec_places: usize) -> Bcd {
    let mut k = constant(K);
    k.len = 1 + dec_places;
    k
}

/// ln 10 truncated to the working precision.
pub fn ln10(dec_places: usize) -> Bcd {
    let mut f = constant(LOG10_FACTOR);
    f.len = 1 + dec_places;
    f
}

/// π truncated to the working precision.
pub fn pi(dec_places: usize) -> Bcd {
    let mut p = constant(PI);
    p.len = 1 + dec_places;
    p
}

/// Degrees-per-radian factor at full stored precision.
pub fn deg_factor() -> Bcd {
    constant(DEG_FACTOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shapes() {
        assert_eq!(TABLES.0.len(), LOG_TABLE_LEN);
        assert_eq!(TABLES.1.len(), TRIG_TABLE_LEN);
        for e in TABLES.0.iter().chain(TABLES.1.iter()) {
            assert_eq!(e.len, ENTRY_DIGITS);
            assert_eq!(e.dec, 2);
            assert!(e.digits[..e.len].iter().all(|&d| d <= 9));
        }
    }

    #[test]
    fn test_known_entries() {
        // ln 2^128, ln 2, ln 1.5
        assert_eq!(
            log_entry(0, 32).to_string(),
            "88.72283911167299960540571154664660"
        );
        assert_eq!(
            log_entry(7, 32).to_string(),
            "00.69314718055994530941723212145818"
        );
        assert_eq!(
            log_entry(8, 32).to_string(),
            "00.40546510810816438197801311546435"
        );
        // atan 1 = 45 degrees, atan 0.5
        assert_eq!(
            trig_entry(0, 32).to_string(),
            "45.00000000000000000000000000000000"
        );
        assert_eq!(
            trig_entry(1, 32).to_string(),
            "26.56505117707798935157219372045329"
        );
    }

    #[test]
    fn test_full_precision_uses_whole_tables() {
        assert_eq!(table_sizes(32), (LOG_TABLE_LEN, TRIG_TABLE_LEN));
        // at six places the deep entries vanish
        let (logs, trig) = table_sizes(6);
        assert!(logs < LOG_TABLE_LEN);
        assert!(trig < TRIG_TABLE_LEN);
        // everything before the cut is non-zero at that precision
        assert!(!log_entry(logs - 1, 6).is_zero());
        assert!(!trig_entry(trig - 1, 6).is_zero());
        assert!(log_entry(logs, 6).is_zero());
    }

    #[test]
    fn test_constants() {
        assert_eq!(pi(32).to_string(), "3.14159265358979323846264338327950");
        assert_eq!(pi(12).to_string(), "3.141592653589");
        assert!(k_seed(32).to_string().starts_with("0.60725293500888"));
        assert!(ln10(32).to_string().starts_with("2.302585092994045684"));
    }

    #[test]
    fn test_factor_constants_agree() {
        use crate::bcd::{div, mul};
        use crate::test_util::{assert_close, bcd};
        // the angle factors are reciprocals, and pi/2 is half of pi
        let product = mul(&constant(DEG_FACTOR), &constant(RAD_FACTOR), 32);
        assert_close(&product, &bcd("1"), 30);
        let half = div(&constant(PI), &bcd("2"), 32);
        assert_close(&half, &constant(PI_2), 30);
    }
}
