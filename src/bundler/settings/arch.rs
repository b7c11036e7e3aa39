//! CPU architecture detection for built executables.

use crate::bundler::error::{Error, ErrorExt, Result};
use goblin::Object;
use std::path::Path;

/// CPU architecture of a built executable.
///
/// Detected by parsing the binary itself rather than trusting the host,
/// so a 32-bit build packaged on a 64-bit machine is still named correctly.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Arch {
    /// x86 / i686 (32-bit)
    X86,
    /// x86_64 / AMD64 (64-bit)
    X86_64,
    /// AArch64 / ARM64 (64-bit)
    AArch64,
}

impl Arch {
    /// Bit width used in package names (`-win-x64`, `-linux-x32`).
    pub fn bits(self) -> u32 {
        match self {
            Arch::X86 => 32,
            Arch::X86_64 | Arch::AArch64 => 64,
        }
    }

    /// Detects the architecture of the executable at `path`.
    pub async fn of_binary(path: &Path) -> Result<Arch> {
        let data = tokio::fs::read(path)
            .await
            .fs_context("reading executable for architecture detection", path)?;
        Self::of_bytes(&data)
    }

    fn of_bytes(data: &[u8]) -> Result<Arch> {
        match Object::parse(data)? {
            Object::Elf(elf) => Self::of_elf_machine(elf.header.e_machine),
            Object::PE(pe) => Self::of_pe_machine(pe.header.coff_header.machine),
            Object::Mach(mach) => Self::of_mach(&mach),
            _ => Err(Error::ArchError(
                "unrecognized executable format".to_string(),
            )),
        }
    }

    fn of_elf_machine(machine: u16) -> Result<Arch> {
        use goblin::elf::header::{EM_386, EM_AARCH64, EM_X86_64};
        match machine {
            EM_X86_64 => Ok(Arch::X86_64),
            EM_386 => Ok(Arch::X86),
            EM_AARCH64 => Ok(Arch::AArch64),
            other => Err(Error::ArchError(format!(
                "unsupported ELF machine type {:#x}",
                other
            ))),
        }
    }

    fn of_pe_machine(machine: u16) -> Result<Arch> {
        use goblin::pe::header::{COFF_MACHINE_ARM64, COFF_MACHINE_X86, COFF_MACHINE_X86_64};
        match machine {
            COFF_MACHINE_X86_64 => Ok(Arch::X86_64),
            COFF_MACHINE_X86 => Ok(Arch::X86),
            COFF_MACHINE_ARM64 => Ok(Arch::AArch64),
            other => Err(Error::ArchError(format!(
                "unsupported PE machine type {:#x}",
                other
            ))),
        }
    }

    fn of_mach(mach: &goblin::mach::Mach) -> Result<Arch> {
        use goblin::mach::Mach;
        match mach {
            Mach::Binary(macho) => Self::of_mach_cputype(macho.header.cputype),
            // Fat binaries: every slice shares the bit width we care about,
            // so the first recognized slice decides.
            Mach::Fat(fat) => fat
                .arches()?
                .iter()
                .find_map(|arch| Self::of_mach_cputype(arch.cputype).ok())
                .ok_or_else(|| {
                    Error::ArchError("no recognized slice in fat Mach-O binary".to_string())
                }),
        }
    }

    fn of_mach_cputype(cputype: u32) -> Result<Arch> {
        use goblin::mach::cputype::{CPU_TYPE_ARM64, CPU_TYPE_X86, CPU_TYPE_X86_64};
        match cputype {
            CPU_TYPE_X86_64 => Ok(Arch::X86_64),
            CPU_TYPE_X86 => Ok(Arch::X86),
            CPU_TYPE_ARM64 => Ok(Arch::AArch64),
            other => Err(Error::ArchError(format!(
                "unsupported Mach-O cpu type {:#x}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal valid ELF header: e_ident plus zeroed tables.
    fn elf_header(class: u8, machine: u16) -> Vec<u8> {
        let len = if class == 2 { 64 } else { 52 };
        let mut header = vec![0u8; len];
        header[0..4].copy_from_slice(&[0x7f, b'E', b'L', b'F']);
        header[4] = class; // ELFCLASS32 / ELFCLASS64
        header[5] = 1; // little-endian
        header[6] = 1; // EV_CURRENT
        header[16] = 2; // ET_EXEC
        header[18..20].copy_from_slice(&machine.to_le_bytes());
        header[20] = 1; // e_version
        header
    }

    #[test]
    fn detects_64_bit_elf() {
        let arch = Arch::of_bytes(&elf_header(2, 0x3e)).unwrap();
        assert_eq!(arch, Arch::X86_64);
        assert_eq!(arch.bits(), 64);
    }

    #[test]
    fn detects_32_bit_elf() {
        let arch = Arch::of_bytes(&elf_header(1, 0x03)).unwrap();
        assert_eq!(arch, Arch::X86);
        assert_eq!(arch.bits(), 32);
    }

    #[test]
    fn rejects_garbage_input() {
        assert!(Arch::of_bytes(b"this is not an executable").is_err());
    }

    #[test]
    fn aarch64_is_64_bit() {
        assert_eq!(Arch::AArch64.bits(), 64);
    }
}
