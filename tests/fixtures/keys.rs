// @generated by sealed-keys 0.1.0 at 2026-10-19T12:00:00Z. Do not edit.
//
// Envelopes are `salt:iv:ciphertext` hex. They only open with the master
// material that was in effect when this file was generated.

use sealed_keys::lookup::lookup_static;
use sealed_keys::{MasterMaterial, SecretString};

pub const ENCRYPTED_KEYS: &[(&str, &str)] = &[
    ("GITHUB_TOKEN", "f57df2ae76870dc88562f80c5fc1cc73:633c1bc84fcc7e476e9547857ce30082:ed47839e5e88d30e523eba24ffa588a5879d13fc5f7cf7f29f5be61b0fe55748b7186dbbe57b76c290d162f40a3f0423170e9d0541af03a907df8bc5c0331abd"),
    ("EMAILJS_SERVICE_ID", "fadab5d5f50deb3e6288061df0f16422:0e54cf184910ff0408923d99e24e5039:41f3d9c000b770bf886c3c799e129f6e55172c67d66d0f964cc957eaa78f69598f7208197e24851bd1e0666806a6b825"),
    ("EMAILJS_TEMPLATE_ID", "a02c15d15fdcaba889ed499460483cd1:0296ad2a47d72dd433673cd522fb620d:bc221696ab3998cf644f4ade8ff9355579cbc03fea6785225d55c502ee7b06e74a8661dc2d5dd23e93f08bbd871101d2"),
    ("EMAILJS_PUBLIC_KEY", "14e15f1aaa9b21373ecab73e3638b673:c3840b219a3b176fd0d457d975e7a666:6039a3a2ecf133213e2dd5a1e4f2b98582bf143e1390b367488a799b84284c340d6574335f4c5397a9e5903217ad6867"),
];

/// Decrypt the secret called `name`.
///
/// Returns `None` when the name is unknown or the entry cannot be decrypted.
pub fn get_key(name: &str, master: &MasterMaterial) -> Option<SecretString> {
    lookup_static(ENCRYPTED_KEYS, name, master)
}
