//! Facade tests: encrypt/decrypt/sign/verify over loaded key material.

use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use rsa_keyconv::{
    encoding, generate_key_pair, to_private_key, to_public_key, EncryptionPadding, Error,
    KeyFormat, RsaCrypto,
};

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::from_seed([7; 32])
}

fn private_material() -> rsa_keyconv::KeyMaterial {
    let (private_text, _) = generate_key_pair(&mut rng(), KeyFormat::Pkcs1, 1024, true).unwrap();
    encoding::decode_pkcs1_private(&private_text).unwrap()
}

#[test]
fn runtime_keys_build_from_material() {
    let material = private_material();
    assert!(to_private_key(&material).is_ok());
    assert!(to_public_key(&material).is_ok());
    assert!(to_public_key(&material.public_half()).is_ok());
}

#[test]
fn to_private_key_rejects_public_material() {
    let material = private_material().public_half();
    assert!(matches!(
        to_private_key(&material),
        Err(Error::MaterialIncomplete("D"))
    ));
}

#[test]
fn encrypt_decrypt_round_trip() {
    let material = private_material();
    let crypto = RsaCrypto::new(None, Some(&material)).unwrap();
    let mut rng = rng();

    for padding in [EncryptionPadding::Pkcs1v15, EncryptionPadding::OaepSha256] {
        let ciphertext = crypto.encrypt(&mut rng, "hello world", padding).unwrap();
        assert_ne!(ciphertext, "hello world");
        assert_eq!(crypto.decrypt(&ciphertext, padding).unwrap(), "hello world");
    }
}

#[test]
fn sign_verify_round_trip() {
    use rsa_keyconv::SignaturePadding;

    let material = private_material();
    let crypto = RsaCrypto::new(None, Some(&material)).unwrap();
    let mut rng = rng();

    for padding in [
        SignaturePadding::Pkcs1v15Sha256,
        SignaturePadding::PssSha256,
    ] {
        let signature = crypto.sign(&mut rng, "signed payload", padding).unwrap();
        assert!(crypto.verify("signed payload", &signature, padding).unwrap());
        assert!(!crypto.verify("tampered payload", &signature, padding).unwrap());
    }
}

#[test]
fn public_only_crypto_cannot_decrypt_or_sign() {
    use rsa_keyconv::SignaturePadding;

    let material = private_material();
    let public = material.public_half();
    let crypto = RsaCrypto::new(Some(&public), None).unwrap();
    let mut rng = rng();

    let ciphertext = crypto
        .encrypt(&mut rng, "hello", EncryptionPadding::Pkcs1v15)
        .unwrap();
    assert!(matches!(
        crypto.decrypt(&ciphertext, EncryptionPadding::Pkcs1v15),
        Err(Error::MaterialIncomplete(_))
    ));
    assert!(matches!(
        crypto.sign(&mut rng, "hello", SignaturePadding::Pkcs1v15Sha256),
        Err(Error::MaterialIncomplete(_))
    ));
}

#[test]
fn missing_both_halves_is_rejected() {
    assert!(matches!(
        RsaCrypto::new(None, None),
        Err(Error::MaterialIncomplete(_))
    ));
}

#[test]
fn cross_format_keys_interoperate() {
    // Encrypt against the public half loaded from XML, decrypt with the
    // private half loaded from PKCS#8.
    let (private_text, _) = generate_key_pair(&mut rng(), KeyFormat::Pkcs8, 1024, true).unwrap();
    let material = encoding::decode_pkcs8_private(&private_text).unwrap();

    let xml_public = rsa_keyconv::xml::encode_public(&material.public_half());
    let public_material = rsa_keyconv::xml::decode(&xml_public).unwrap();

    let sender = RsaCrypto::new(Some(&public_material), None).unwrap();
    let receiver = RsaCrypto::new(None, Some(&material)).unwrap();

    let mut rng = rng();
    let ciphertext = sender
        .encrypt(&mut rng, "cross-format", EncryptionPadding::OaepSha256)
        .unwrap();
    assert_eq!(
        receiver
            .decrypt(&ciphertext, EncryptionPadding::OaepSha256)
            .unwrap(),
        "cross-format"
    );
}
