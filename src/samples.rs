//! Built-in programs, ready to load.

use crate::errors::{Error, Result};
use crate::loader::{InputCell, ProgramImage, Segment};

pub const NAMES:[&str; 4] = ["product", "quadratic", "primes", "pyramid"];

fn input(addr:u16, label:&str, default:i32) -> InputCell {
    InputCell { addr, label: label.to_string(), default }
}

pub fn by_name(name:&str) -> Result<ProgramImage> {
    match name {
        "product" => Ok(product()),
        "quadratic" => Ok(quadratic()),
        "primes" => Ok(primes()),
        "pyramid" => Ok(pyramid()),
        _ => Err(Error::UnknownSample(name.to_string())),
    }
}

/// X = A*B, X = X+10, print "X=" X '\n'.
pub fn product() -> ProgramImage {
    ProgramImage {
        name: "product".to_string(),
        description: "X = A*B + 10".to_string(),
        data: Segment::new(0x0100, &[
            0x0007, // 0100: A
            0x8005, // 0102: B
            0x0000, // 0104: X
            0x000A, // 0106: 10
            0x583D, // 0108: "X="
            0x0000, // 010A: '\0'
        ]),
        code: Segment::new(0x0200, &[
            0x1100, // 0200: lda A
            0x7102, //       mul B
            0x2104, //       sta X
            0x1104, //       lda X
            0x3106, //       add 10
            0x2104, //       sta X
            0xD108, //       prs "X="
            0xB104, //       prt X
            0xC00A, //       prc '\n'
            0x8000, //       hlt
        ]),
        entry: 0x0200,
        inputs: vec![input(0x0100, "A", 7), input(0x0102, "B", -5)],
        config: None,
    }
}

/// Y = A*X^2 + B*X + C, printed after the prompt "AX^2+BX+C=".
///
/// Y gets a cell of its own at 0x0108 ahead of the prompt. Storing it right
/// after the prompt, in the word that also terminates the string, would let
/// a negative Y or one above 255 leak into the printed prompt.
pub fn quadratic() -> ProgramImage {
    ProgramImage {
        name: "quadratic".to_string(),
        description: "Y = AX^2+BX+C".to_string(),
        data: Segment::new(0x0100, &[
            0x0007, // 0100: A
            0x8005, // 0102: B
            0x0003, // 0104: C
            0x0002, // 0106: X
            0x0000, // 0108: Y
            0x4158, // 010A: "AX"
            0x5E32, // 010C: "^2"
            0x2B42, // 010E: "+B"
            0x582B, // 0110: "X+"
            0x433D, // 0112: "C="
            0x0000, // 0114: '\0'
        ]),
        code: Segment::new(0x0200, &[
            0x1100, // 0200: lda A
            0x7106, //       mul X
            0x7106, //       mul X
            0x2108, //       sta Y
            0x1102, //       lda B
            0x7106, //       mul X
            0x3108, //       add Y
            0x3104, //       add C
            0x2108, //       sta Y
            0xD10A, //       prs "AX^2+BX+C="
            0xB108, //       prt Y
            0xC00A, //       prc '\n'
            0x8000, //       hlt
        ]),
        entry: 0x0200,
        inputs: vec![
            input(0x0100, "A", 7),
            input(0x0102, "B", -5),
            input(0x0104, "C", 3),
            input(0x0106, "X", 2),
        ],
        config: None,
    }
}

/// Prints every prime in A..=B followed by a space. Uses two nested
/// subroutines (is_prime calls is_divisor).
pub fn primes() -> ProgramImage {
    ProgramImage {
        name: "primes".to_string(),
        description: "Prime list of A to B".to_string(),
        data: Segment::new(0x0100, &[
            0x0000, // 0100: a
            0x0000, // 0102: b
            0x0000, // 0104: n
            0x0000, // 0106: flag
            0x0000, // 0108: i
            0x0001, // 010A: true
            0x0000, // 010C: false
            0x0002, // 010E: init
            0x0001, // 0110: j
            0x0000, // 0112: div
            0x0001, // 0114: one
            0x0000, // 0116: zero
        ]),
        code: Segment::new(0x0200, &[
            // is_divisor: flag = true if some i in 2..n divides n
            0x110E, // 0200: lda init
            0x2108, // 0202: sta i
            0x1104, // 0204: lda n
            0x4114, // 0206: sub one
            0x4108, // 0208: sub i
            0xA240, // 020A: brn 0x240
            0x1116, // 020C: lda zero
            0x2110, // 020E: sta j
            0x1108, // 0210: lda i
            0x7110, // 0212: mul j
            0x2112, // 0214: sta div
            0x1104, // 0216: lda n
            0x4112, // 0218: sub div
            0xA238, // 021A: brn 0x238
            0x1104, // 021C: lda n
            0x4112, // 021E: sub div
            0x9224, // 0220: brz 0x224
            0x522A, // 0222: jmp 0x22A
            0x110A, // 0224: lda true
            0x2106, // 0226: sta flag
            0x8005, // 0228: ret
            0x1110, // 022A: lda j
            0x8002, // 022C: iac
            0x2110, // 022E: sta j
            0x1108, // 0230: lda i
            0x7110, // 0232: mul j
            0x2112, // 0234: sta div
            0x5216, // 0236: jmp 0x216
            0x1108, // 0238: lda i
            0x8002, // 023A: iac
            0x2108, // 023C: sta i
            0x5204, // 023E: jmp 0x204
            0x8005, // 0240: ret
            // is_prime
            0x6200, // 0242: cal is_divisor
            0x8005, // 0244: ret
            // main
            0x1100, // 0246: lda a
            0x2104, // 0248: sta n
            0x110E, // 024A: lda init
            0x4100, // 024C: sub a
            0xA254, // 024E: brn 0x254
            0x110E, // 0250: lda init
            0x2104, // 0252: sta n
            0x1102, // 0254: lda b
            0x4104, // 0256: sub n
            0xA272, // 0258: brn 0x272
            0x110C, // 025A: lda false
            0x2106, // 025C: sta flag
            0x6242, // 025E: cal is_prime
            0x1106, // 0260: lda flag
            0x410A, // 0262: sub true
            0x926A, // 0264: brz 0x26A
            0xB104, // 0266: prt n
            0xC020, // 0268: prc ' '
            0x1104, // 026A: lda n
            0x8002, // 026C: iac
            0x2104, // 026E: sta n
            0x5254, // 0270: jmp 0x254
            0x8000, // 0272: hlt
        ]),
        entry: 0x0246,
        inputs: vec![input(0x0100, "A", 2), input(0x0102, "B", 10)],
        config: None,
    }
}

/// Draws a centered pyramid of '#' with `height` rows.
pub fn pyramid() -> ProgramImage {
    ProgramImage {
        name: "pyramid".to_string(),
        description: "Draw Pyramid".to_string(),
        data: Segment::new(0x0100, &[
            0x0000, // 0100: height
            0x0001, // 0102: star
            0x0001, // 0104: i
            0x0001, // 0106: j
            0x0000, // 0108: k
            0x0000, // 010A
        ]),
        code: Segment::new(0x0200, &[
            0x1100, // 0200: lda height
            0xA24C, // 0202: brn hlt
            0x1100, // 0204: lda height
            0x4104, // 0206: sub i
            0xA24C, // 0208: brn hlt
            0x1108, // 020A: lda k
            0x4108, // 020C: sub k
            0x2108, // 020E: sta k
            0x1106, // 0210: lda j
            0x4106, // 0212: sub j
            0x8002, // 0214: iac
            0x2106, // 0216: sta j
            0x1100, // 0218: lda height
            0x4104, // 021A: sub i
            0x4108, // 021C: sub k
            0xA22A, // 021E: brn 0x22A
            0xC020, // 0220: prc ' '
            0x1108, // 0222: lda k
            0x8002, // 0224: iac
            0x2108, // 0226: sta k
            0x5218, // 0228: jmp 0x218
            0x1102, // 022A: lda star
            0x4106, // 022C: sub j
            0xA23A, // 022E: brn 0x23A
            0xC023, // 0230: prc '#'
            0x1106, // 0232: lda j
            0x8002, // 0234: iac
            0x2106, // 0236: sta j
            0x522A, // 0238: jmp 0x22A
            0x1102, // 023A: lda star
            0x8002, // 023C: iac
            0x8002, // 023E: iac
            0x2102, // 0240: sta star
            0x1104, // 0242: lda i
            0x8002, // 0244: iac
            0x2104, // 0246: sta i
            0xC00A, // 0248: prc '\n'
            0x5204, // 024A: jmp 0x204
            0x8000, // 024C: hlt
        ]),
        entry: 0x0200,
        inputs: vec![input(0x0100, "Height", 3)],
        config: None,
    }
}
