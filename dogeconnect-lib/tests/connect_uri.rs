//! End-to-end tests for Connect URI encoding and parsing.

use dogeconnect_lib::keyhash::pub_key_hash;
use dogeconnect_lib::{dogecoin_uri, parse_dogecoin_uri, ConnectError, Koinu};
use sha2::{Digest, Sha256};

const PAY_TO: &str = "DPD7uK4B1kRmbfGmytBhG1DZjaMWNfbpwY";
const PUB_KEY_HEX: &str = "6c52b17752f469c5411b977ba64725d40174d16e780b709b2aff68e0f5abfc50";

#[test]
fn test_dogecoin_uri_round_trip() {
    let amount = "12.25";
    let connect_url = "example.com/dc/1QAB-POvTh2R88nybE8Wwg";
    let pub_key = hex::decode(PUB_KEY_HEX).unwrap();

    let uri = dogecoin_uri(PAY_TO, amount, &format!("https://{connect_url}"), &pub_key);
    assert_eq!(
        uri,
        "dogecoin:DPD7uK4B1kRmbfGmytBhG1DZjaMWNfbpwY?amount=12.25&dc=example.com%2Fdc%2F1QAB-POvTh2R88nybE8Wwg&h=72b-LVh5K_mm7zyN9PXO"
    );

    let res = parse_dogecoin_uri(&uri).unwrap();
    assert!(res.is_connect_uri());
    assert_eq!(res.address, PAY_TO);
    assert_eq!(res.amount, amount);
    assert_eq!(res.connect_url, connect_url);

    let full = Sha256::digest(&pub_key);
    assert_eq!(res.pub_key_hash, full[..15].to_vec());
    assert_eq!(res.pub_key_hash, pub_key_hash(&pub_key).to_vec());
}

#[test]
fn test_unescaped_slash_in_dc() {
    let uri = "dogecoin:DPD7uK4B1kRmbfGmytBhG1DZjaMWNfbpwY?amount=12.25&dc=example.com/dc/1QAB&h=72b-LVh5K_mm7zyN9PXO";
    let res = parse_dogecoin_uri(uri).unwrap();
    assert!(res.is_connect_uri());
    assert_eq!(res.connect_url, "example.com/dc/1QAB");
}

#[test]
fn test_connect_url_with_query_characters() {
    let pub_key = hex::decode(PUB_KEY_HEX).unwrap();
    let connect_url = "example.com/dc?id=1&v=2";
    let uri = dogecoin_uri(PAY_TO, "1", connect_url, &pub_key);
    let res = parse_dogecoin_uri(&uri).unwrap();
    assert_eq!(res.connect_url, connect_url);
    assert_eq!(res.amount, "1");
}

#[test]
fn test_parsed_amount_is_koinu() {
    let pub_key = hex::decode(PUB_KEY_HEX).unwrap();
    let amount: Koinu = "420.69".parse().unwrap();
    let uri = dogecoin_uri(PAY_TO, &amount.to_string(), "example.com/dc/1", &pub_key);
    let res = parse_dogecoin_uri(&uri).unwrap();
    assert_eq!(res.amount_koinu().unwrap(), Some(amount));
}

#[test]
fn test_plain_uri_is_not_connect() {
    let res = parse_dogecoin_uri(&format!("dogecoin:{PAY_TO}?amount=43.61&label=Shop")).unwrap();
    assert!(!res.is_connect_uri());
    assert_eq!(res.amount, "43.61");
}

#[test]
fn test_not_a_dogecoin_uri() {
    assert_eq!(
        parse_dogecoin_uri("https://example.com/dc/1"),
        Err(ConnectError::NotAConnectUri)
    );
    assert_eq!(
        parse_dogecoin_uri("not a uri at all"),
        Err(ConnectError::NotAConnectUri)
    );
}
