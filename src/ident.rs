//! Stable identifier derivation.
//!
//! Polymorphic types go on the wire under a 64-bit identifier derived from a
//! human-chosen name such as `"v1::person"`. The derivation is the first 8
//! bytes of the SHA-1 digest of the name, read as a little-endian integer —
//! stable across processes, runs, platforms, and compilers, which is what
//! lets two independently built programs agree on type identities.
//!
//! [`make_id`] is a `const fn`, so identifiers can live in `const` items and
//! `match` arms, and the value embedded in a registration is computed at
//! compile time.

/// Derives the stable 64-bit identifier for `name`.
///
/// Versioning the name (`"v2::person"`) yields an unrelated identifier,
/// which is the intended way to make incompatible revisions of a type
/// distinguishable on the wire. Distinct names may collide in principle;
/// with 64 bits of SHA-1 output the chance is negligible, and the registry
/// refuses to let a second type occupy an already-taken identifier.
///
/// ```rust
/// use polyarc::make_id;
///
/// const PERSON_ID: u64 = make_id("v1::person");
/// assert_eq!(PERSON_ID, make_id("v1::person"));
/// assert_ne!(PERSON_ID, make_id("v2::person"));
/// ```
pub const fn make_id(name: &str) -> u64 {
    let message = name.as_bytes();
    let len = message.len();

    // Padded layout: message, 0x80, zeros, 64-bit big-endian bit length,
    // rounded up to whole 64-byte blocks.
    let total_blocks = (len + 8) / 64 + 1;
    let total_bytes = total_blocks * 64;
    let bit_len = (len as u64) * 8;

    let mut h0: u32 = 0x6745_2301;
    let mut h1: u32 = 0xEFCD_AB89;
    let mut h2: u32 = 0x98BA_DCFE;
    let mut h3: u32 = 0x1032_5476;
    let mut h4: u32 = 0xC3D2_E1F0;

    let mut block = 0;
    while block < total_blocks {
        let mut w = [0u32; 80];

        // The sixteen message words of this block, big-endian, with the
        // padding synthesized on the fly instead of materializing a buffer
        // (const contexts cannot allocate).
        let mut i = 0;
        while i < 16 {
            let mut word: u32 = 0;
            let mut n = 0;
            while n < 4 {
                let idx = block * 64 + i * 4 + n;
                let byte = if idx < len {
                    message[idx]
                } else if idx == len {
                    0x80
                } else if idx >= total_bytes - 8 {
                    (bit_len >> ((total_bytes - 1 - idx) * 8)) as u8
                } else {
                    0
                };
                word = (word << 8) | byte as u32;
                n += 1;
            }
            w[i] = word;
            i += 1;
        }

        // Expand to eighty words.
        while i < 80 {
            w[i] = (w[i - 3] ^ w[i - 8] ^ w[i - 14] ^ w[i - 16]).rotate_left(1);
            i += 1;
        }

        let mut a = h0;
        let mut b = h1;
        let mut c = h2;
        let mut d = h3;
        let mut e = h4;

        let mut round = 0;
        while round < 80 {
            let f: u32;
            let k: u32;
            if round < 20 {
                f = (b & c) | (!b & d);
                k = 0x5A82_7999;
            } else if round < 40 {
                f = b ^ c ^ d;
                k = 0x6ED9_EBA1;
            } else if round < 60 {
                f = (b & c) | (b & d) | (c & d);
                k = 0x8F1B_BCDC;
            } else {
                f = b ^ c ^ d;
                k = 0xCA62_C1D6;
            }

            let temp = a
                .rotate_left(5)
                .wrapping_add(f)
                .wrapping_add(e)
                .wrapping_add(k)
                .wrapping_add(w[round]);
            e = d;
            d = c;
            c = b.rotate_left(30);
            b = a;
            a = temp;

            round += 1;
        }

        h0 = h0.wrapping_add(a);
        h1 = h1.wrapping_add(b);
        h2 = h2.wrapping_add(c);
        h3 = h3.wrapping_add(d);
        h4 = h4.wrapping_add(e);

        block += 1;
    }

    // First 8 digest bytes as a little-endian u64.
    (((h0 as u64) << 32) | (h1 as u64)).swap_bytes()
}
