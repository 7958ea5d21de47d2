//! One-shot wrappers over the hash primitives used by the protocol.
//!
//! `sha3_512` is the `H` of the signature scheme and of key expansion.

use ripemd::Ripemd160;
use sha2::Sha256;
use sha3::{Digest, Keccak256, Sha3_256, Sha3_512};

/// SHA-256
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA3-256 (FIPS 202 padding)
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    Sha3_256::digest(data).into()
}

/// Keccak-256 with the pre-standard Keccak padding.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// SHA3-512 over the concatenation of `inputs`.
pub fn sha3_512(inputs: &[&[u8]]) -> [u8; 64] {
    let mut hasher = Sha3_512::new();
    for input in inputs {
        hasher.update(input);
    }
    let mut digest = [0u8; 64];
    digest.copy_from_slice(&hasher.finalize());
    digest
}

/// RIPEMD-160
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const DIGEST_INPUT: [u8; 32] =
        hex!("B778A39A3663719DFC5E48C9D78431B1E45C2AF9DF538782BF199C189DABEAC7");

    #[test]
    fn sha256_vector() {
        assert_eq!(
            sha256(b"36e82fd88dbd06c07effe09ac6a652aca2b111b653d05429df494ad958273098"),
            hex!("c346f5ecf5bcfa54ab14fad815c8239bdeb051df8835d212dba2af59f688a00e")
        );
    }

    #[test]
    fn keccak_and_sha3_differ_only_in_padding() {
        assert_eq!(
            keccak256(&DIGEST_INPUT),
            hex!("241c1d54c18c8422def03aa16b4b243a8ba491374295a1a6965545e6ac1af314")
        );
        assert_eq!(
            sha3_256(&DIGEST_INPUT),
            hex!("9b3155b37159da50aa52d5967c509b410f5a36a3b1e31ecb5ac76675d79b4a5e")
        );
    }

    #[test]
    fn sha3_512_vector() {
        let input = hex!(
            "B778A39A3663719DFC5E48C9D78431B1E45C2AF9DF538782BF199C189DABEAC7"
            "680ADA57DCEC8EEE91C4E3BF3BFA9AF6FFDE90CD1D249D1C6121D7B759A001B1"
        );
        let expected = hex!(
            "d23859866f93f2698a5b48586543c608d85a57c74e9ce92d86a0b25065d8155c"
            "16754d840026b8c536f2bcb963a7d867f034ec241b87162ac33daf7b707cb5f7"
        );
        assert_eq!(sha3_512(&[&input]), expected);
        // Split input hashes the same as the concatenation.
        assert_eq!(sha3_512(&[&input[..10], &input[10..]]), expected);
    }

    #[test]
    fn ripemd160_vector() {
        assert_eq!(
            ripemd160(b"8ed368fe7077da578f72785771529a407d3c40e70fff0f70723a34d8d1a643ce"),
            hex!("3fc43d717d824302e3821de8129ea2f7786912e5")
        );
    }
}
