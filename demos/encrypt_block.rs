use des_core::bits::Bits;
use des_core::des;

fn main() {
    let sample_inp: u64 = 0x0123456789ABCDEF;
    let sample_key: u64 = 0x133457799BBCDFF1;

    let expected_encrypted_value: u64 = 0x85E813540F0AB405;

    let keys = des::generate_round_keys(Bits::new(sample_key, 64));
    let enc = des::encrypt_block(Bits::new(sample_inp, 64), &keys);
    let dec = des::decrypt_block(enc, &keys);
    println!(
        "ENC({:016X}, {:016X}) should be: {:016X}",
        sample_inp, sample_key, expected_encrypted_value
    );
    println!("Actually encrypted value: {:016X}", enc.value());
    println!("DEC({:016X}, {:016X}) is: {:016X}", enc.value(), sample_key, dec.value());

    // The same through the byte-oriented API.
    let ciphertext = des_core::encrypt_block(b"abcdefgh", b"12345678").unwrap();
    let plaintext = des_core::decrypt_block(&ciphertext, b"12345678").unwrap();
    println!("ENC(\"abcdefgh\", \"12345678\") = {:02X?}", ciphertext);
    println!("Decrypted back: {}", String::from_utf8_lossy(&plaintext));
}
