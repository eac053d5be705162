//! Shared library word-size detection
//!
//! Reads the object file header to tell 32-bit from 64-bit builds. Used to
//! classify loader failures as architecture mismatches without looking at
//! the loader's error text.

const ELF_MAGIC: &[u8; 4] = b"\x7FELF";
const ELFCLASS32: u8 = 1;
const ELFCLASS64: u8 = 2;

const MACHO_MAGIC_32: u32 = 0xfeed_face;
const MACHO_MAGIC_64: u32 = 0xfeed_facf;

const PE_LFANEW_OFFSET: usize = 0x3c;
const PE_OPTIONAL_MAGIC_32: u16 = 0x10b;
const PE_OPTIONAL_MAGIC_64: u16 = 0x20b;

/// Returns `Some(true)` for a 64-bit object, `Some(false)` for 32-bit, and
/// `None` when the header is unknown, truncated, or a universal binary.
pub fn binary_is_64bit(header: &[u8]) -> Option<bool> {
    if header.len() < 5 {
        return None;
    }

    // ELF: e_ident[EI_CLASS] at offset 4
    if &header[0..4] == ELF_MAGIC {
        return match header[4] {
            ELFCLASS32 => Some(false),
            ELFCLASS64 => Some(true),
            _ => None,
        };
    }

    // Mach-O thin binaries, either byte order
    let magic = [header[0], header[1], header[2], header[3]];
    for value in [u32::from_le_bytes(magic), u32::from_be_bytes(magic)] {
        match value {
            MACHO_MAGIC_32 => return Some(false),
            MACHO_MAGIC_64 => return Some(true),
            _ => {}
        }
    }

    if &header[0..2] == b"MZ" {
        return pe_is_64bit(header);
    }

    None
}

/// PE: follow e_lfanew to the NT headers and read the optional header magic
fn pe_is_64bit(header: &[u8]) -> Option<bool> {
    let lfanew_bytes = header.get(PE_LFANEW_OFFSET..PE_LFANEW_OFFSET + 4)?;
    let lfanew = u32::from_le_bytes(lfanew_bytes.try_into().ok()?) as usize;

    if header.get(lfanew..lfanew.checked_add(4)?)? != b"PE\0\0" {
        return None;
    }

    // 4-byte signature + 20-byte COFF file header
    let magic_at = lfanew.checked_add(24)?;
    let magic_bytes = header.get(magic_at..magic_at.checked_add(2)?)?;
    match u16::from_le_bytes(magic_bytes.try_into().ok()?) {
        PE_OPTIONAL_MAGIC_32 => Some(false),
        PE_OPTIONAL_MAGIC_64 => Some(true),
        _ => None,
    }
}
