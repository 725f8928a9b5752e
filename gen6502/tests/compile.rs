use gen6502::{AddressingMode, GenError, Operand, Program, Target, VECTOR_BYTES};
use proptest::prelude::*;

const ORIGIN: u32 = 0xF000;

fn start_loop() -> Program {
    let mut program = Program::new();
    program.label("start");
    program.lda_immediate(5).unwrap();
    program.sta_zero_page(2).unwrap();
    program.jmp_absolute("start").unwrap();
    program
}

#[test]
fn start_loop_end_to_end() {
    let assembly = start_loop().compile(&Target::default()).unwrap();

    assert_eq!(assembly.origin, ORIGIN);
    assert_eq!(assembly.labels.len(), 1);
    assert_eq!(assembly.labels["start"], ORIGIN);

    let bytes: Vec<(u32, u8)> = assembly.bytes.iter().map(|(&a, &b)| (a, b)).collect();
    assert_eq!(
        bytes,
        vec![
            (0xF000, 0xA9),
            (0xF001, 5),
            (0xF002, 0x85),
            (0xF003, 2),
            (0xF004, 0x4C),
            (0xF005, (ORIGIN & 0xFF) as u8),
            (0xF006, (ORIGIN >> 8) as u8),
        ]
    );

    let image = &assembly.image;
    assert_eq!(image.len(), 4096);
    assert_eq!(&image[..7], &[0xA9, 5, 0x85, 2, 0x4C, 0x00, 0xF0]);
    let tail = image.len() - VECTOR_BYTES as usize;
    assert!(image[7..tail].iter().all(|&b| b == 0));
    assert_eq!(&image[tail..], &[0x00, 0xF0, 0x00, 0xF0]);
}

#[test]
fn compiling_twice_is_identical() {
    let program = start_loop();
    let first = program.compile(&Target::default()).unwrap();
    let second = program.compile(&Target::default()).unwrap();
    assert_eq!(first.image, second.image);
    assert_eq!(first.listing, second.listing);
    assert_eq!(first.labels, second.labels);
}

#[test]
fn absolute_operands_split_into_little_endian_bytes() {
    let mut program = Program::new();
    program.jmp_absolute("far").unwrap();
    program.data("pad", &[0; 0x1F0]);
    program.label("far");
    program.lda_absolute_x("far").unwrap();

    let assembly = program.compile(&Target::default()).unwrap();
    let far = assembly.labels["far"];
    let bytes = &assembly.bytes;
    for opcode_address in [ORIGIN, far] {
        let low = bytes[&(opcode_address + 1)] as u32;
        let high = bytes[&(opcode_address + 2)] as u32;
        assert_eq!(low | (high << 8), far);
    }
}

/// Offset byte of a `BNE` placed at `ORIGIN + before` that targets `ORIGIN + target`.
fn branch_result(before: u32, target: u32) -> Result<u8, GenError> {
    let mut program = Program::new();
    for _ in 0..before {
        program.nop()?;
    }
    program.bne((ORIGIN + target) as i32)?;
    let assembly = program.compile(&Target::default())?;
    Ok(assembly.bytes[&(ORIGIN + before + 1)])
}

#[test]
fn backward_branch_to_label() {
    let mut program = Program::new();
    program.label("top");
    for _ in 0..126 {
        program.nop().unwrap();
    }
    program.bne("top").unwrap();
    let assembly = program.compile(&Target::default()).unwrap();
    assert_eq!(assembly.bytes[&(ORIGIN + 127)], 0x80);

    program.nop().unwrap();
    program.bne("top").unwrap();
    assert!(program.compile(&Target::default()).is_err());
}

#[test]
fn backward_branch_reach() {
    assert!(branch_result(126, 0).is_ok());
    assert!(matches!(
        branch_result(127, 0),
        Err(GenError::BranchOutOfRange { .. })
    ));
}

#[test]
fn forward_branch_reach() {
    let offset = branch_result(0, 129).unwrap();
    assert_eq!(ORIGIN as i64 + 2 + offset as i8 as i64, (ORIGIN + 129) as i64);
    assert!(matches!(
        branch_result(0, 130),
        Err(GenError::BranchOutOfRange { .. })
    ));
}

#[test]
fn zero_page_range_is_checked_when_resolving() {
    for (value, ok) in [(0, true), (255, true), (256, false), (-1, false)] {
        let mut program = Program::new();
        program
            .emit("STA", AddressingMode::ZeroPage, Some(Operand::Literal(value)))
            .unwrap();
        assert_eq!(program.compile(&Target::default()).is_ok(), ok, "value {value}");
    }
}

#[test]
fn zero_page_labels_must_resolve_into_page_zero() {
    let mut program = Program::new();
    program.label("code");
    program.sta_zero_page("code").unwrap();
    assert!(matches!(
        program.compile(&Target::default()),
        Err(GenError::OutOfRange { value: 0xF000, .. })
    ));
}

#[test]
fn failed_compilation_produces_nothing() {
    let mut program = start_loop();
    program.label("start");
    assert!(matches!(
        program.compile(&Target::default()),
        Err(GenError::DuplicateLabel(name)) if name == "start"
    ));
}

proptest! {
    #[test]
    fn items_without_labels_are_laid_out_in_order(
        kinds in proptest::collection::vec(0u8..4, 0..64)
    ) {
        let mut program = Program::new();
        let mut expected = Vec::new();
        let mut address = ORIGIN;
        for (i, kind) in kinds.iter().enumerate() {
            let id = match *kind {
                0 => program.nop().unwrap(),
                1 => program.lda_immediate(i as i32 % 256).unwrap(),
                2 => program.sta_zero_page(0x80).unwrap(),
                _ => program.sta_absolute(0x0280u16).unwrap(),
            };
            expected.push(address);
            address += program.tree().recursive_length(id);
        }
        prop_assert_eq!(program.length(), address - ORIGIN);

        let labels = program.layout(ORIGIN).unwrap();
        let bytes = program.resolve(&labels, ORIGIN).unwrap();
        // every item's opcode lands at its computed address
        for (kind, &at) in kinds.iter().zip(&expected) {
            let opcode = [0xEA, 0xA9, 0x85, 0x8D][*kind as usize];
            prop_assert_eq!(bytes[&at], opcode);
        }
    }

    #[test]
    fn valid_branches_decode_to_their_target(before in 0u32..200, distance in -126i64..=129) {
        let target = before as i64 + distance;
        prop_assume!(target >= 0);
        let offset = branch_result(before, target as u32).unwrap();
        let decoded = (ORIGIN + before) as i64 + 2 + offset as i8 as i64;
        prop_assert_eq!(decoded, ORIGIN as i64 + target);
    }

    #[test]
    fn immediate_accepts_exactly_the_byte_range(value in -512i32..512) {
        let mut program = Program::new();
        let result = program.lda_immediate(value);
        prop_assert_eq!(result.is_ok(), (0..=255).contains(&value));
    }
}
