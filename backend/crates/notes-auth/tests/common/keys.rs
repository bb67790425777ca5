//! Test-only RSA keys and token builders.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::{Value, json};

pub const ISSUER: &str = "https://tenant.example.com/";
pub const AUDIENCE: &str = "https://notes.example.com";

pub const RSA_A_PEM: &str = include_str!("../fixtures/rsa_a.pem");
pub const RSA_B_PEM: &str = include_str!("../fixtures/rsa_b.pem");

/// Public moduli of the two fixture keys (exponent is AQAB for both)
pub const KEY_A_N: &str = "0ZB-TNMxbEXWa4WAMjYv_bUIgwHXC8UCATuugjBTXiQt9nkihd5Cx7c4o7zESbKldp4gD9wbOZ1TtRBQFPklBcrrMwIGgLQZRanqD9my_kJveuJ7NGG98itECwMhdphK373V8_aJlfr87ZJE9HRr7y9ZvS1JNwFRNwi0RCrs31X-eO9hdtnOHy6FWmiP4PNImYl9Iu9kG3Je43bVWMQk7wC-ow34IwRoTRPBPilvcKemNPpS-rIfFyWM4X4ECsYlEhOLiYUpxRX_0v_obGJ12DYCQbGPytFslfEXSbrSdIG-mOVZk7Py35Jmne-aV9yaRJUdLiJoNX6cI7uBOpl8GQ";
pub const KEY_B_N: &str = "mIGsgnf7ee5F5yiw4BPkIEzMh-TDVCoq9Gn1BJtqU8I5Gn7YpP2gXAmrPrI2KETvYa6vWk3pKZHigRX-blGadg7ZfrpAFuT8hMk-mFReaSvcLd-EYcq_UhGarisJdGiqDylK0G-IB3QDx4kCZEUmje5oeslDfVfZ7qpe6uXrsbkVWwBcmq76wY7A4VXIpNquRG4UkMnRmA7d6_wMUgVFPGBUoC_2VWOQ4OFpla_uta1Ax3OhYjawrjFVO07Vr9VopzmVyKEQ0_qrAvoBu5T6gbF7QT4o8GEjFYbSgJbin5DM9Yr3v-rgxS6syANbWmcgdgv6dqbvzdFpzR95_hlQqQ";

/// One RSA signing key in JWK form
pub fn jwk(kid: &str, n: &str) -> Value {
    json!({
        "kty": "RSA",
        "use": "sig",
        "alg": "RS256",
        "kid": kid,
        "n": n,
        "e": "AQAB",
    })
}

pub fn jwks_body(keys: Vec<Value>) -> Value {
    json!({ "keys": keys })
}

/// Typical provider payload, valid for an hour
pub fn federated_claims(subject: &str, email: &str) -> Value {
    let now = Utc::now().timestamp();
    json!({
        "iss": ISSUER,
        "sub": subject,
        "aud": AUDIENCE,
        "email": email,
        "name": "Federated Person",
        "picture": "https://img.example.com/p.png",
        "iat": now,
        "exp": now + 3600,
    })
}

pub fn sign_federated(claims: &Value, kid: &str, private_pem: &str) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(kid.to_string());

    encode(
        &header,
        claims,
        &EncodingKey::from_rsa_pem(private_pem.as_bytes()).unwrap(),
    )
    .unwrap()
}

/// HMAC-signed token, used to attempt algorithm confusion
pub fn sign_hs256(claims: &Value, kid: Option<&str>, secret: &[u8]) -> String {
    let mut header = Header::new(Algorithm::HS256);
    header.kid = kid.map(String::from);

    encode(&header, claims, &EncodingKey::from_secret(secret)).unwrap()
}
