//! Public assembler API: builder pattern over an instruction sequence.
//!
//! [`Assembler`] collects instructions, seed symbols and configuration, then
//! [`Assembler::finish`] runs both link passes and packages the output as
//! an [`AssemblyResult`].

use alloc::collections::BTreeMap;
use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::string::ToString;
use alloc::vec::Vec;

use crate::error::AsmError;
use crate::instruction::{advance_address, Instruction};
use crate::linker::{self, LinkOptions};
use crate::symbols::SymbolTable;

/// One instruction's row in a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Annotation {
    address: u64,
    len: u64,
    text: String,
}

/// The result of a successful assembly operation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct AssemblyResult {
    /// The assembled machine code.
    bytes: Vec<u8>,
    /// Labels defined by the sequence, sorted by address then name.
    labels: Vec<(String, u64)>,
    /// Base address used during assembly.
    base_address: u64,
    /// Per-instruction listing rows; empty unless listing was enabled.
    annotations: Vec<Annotation>,
}

impl AssemblyResult {
    /// Get the assembled bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use ppc_asm::{ppc, Assembler};
    ///
    /// let mut asm = Assembler::new();
    /// asm.push(ppc::nop())?;
    /// let result = asm.finish()?;
    /// assert_eq!(result.bytes(), &[0x60, 0x00, 0x00, 0x00]);
    /// # Ok::<(), ppc_asm::AsmError>(())
    /// ```
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume and return the bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Number of assembled bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether no bytes were produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Labels defined by the instruction sequence, sorted by address then
    /// name. Seed symbols are not included.
    ///
    /// # Examples
    ///
    /// ```
    /// use ppc_asm::{ppc, Assembler};
    ///
    /// let mut asm = Assembler::new();
    /// asm.push(ppc::nop().with_label("start"))?;
    /// asm.push(ppc::blr()?.with_label("end"))?;
    /// let result = asm.finish()?;
    /// assert_eq!(
    ///     result.labels(),
    ///     &[("start".to_string(), 0), ("end".to_string(), 4)]
    /// );
    /// # Ok::<(), ppc_asm::AsmError>(())
    /// ```
    #[must_use]
    pub fn labels(&self) -> &[(String, u64)] {
        &self.labels
    }

    /// Look up a label address by name.
    #[must_use]
    pub fn label_address(&self, name: &str) -> Option<u64> {
        self.labels.iter().find(|(n, _)| n == name).map(|(_, a)| *a)
    }

    /// Get the base address used during assembly.
    #[must_use]
    pub fn base_address(&self) -> u64 {
        self.base_address
    }

    /// Produce a human-readable listing of address, hex bytes and
    /// instruction text.
    ///
    /// Labels are shown on their own line with their resolved address.
    /// Returns an empty string unless [`Assembler::enable_listing`] was
    /// called.
    ///
    /// # Example output
    ///
    /// ```text
    /// 80003000                  loop:
    /// 80003000  60000000          <60000000>
    /// 80003004  4BFFFFFC          <b loop>
    /// ```
    #[must_use]
    pub fn listing(&self) -> String {
        use core::fmt::Write;

        let mut out = String::new();
        if self.annotations.is_empty() {
            return out;
        }

        let mut label_at: BTreeMap<u64, Vec<&str>> = BTreeMap::new();
        for (name, addr) in &self.labels {
            label_at.entry(*addr).or_default().push(name);
        }

        let mut end = self.base_address;
        for ann in &self.annotations {
            if let Some(names) = label_at.remove(&ann.address) {
                for name in names {
                    let _ = writeln!(out, "{:08X}                  {}:", ann.address, name);
                }
            }

            let start = (ann.address - self.base_address) as usize;
            let stop = start + ann.len as usize;
            let hex = self
                .bytes
                .get(start..stop)
                .unwrap_or_default()
                .iter()
                .fold(String::new(), |mut acc, b| {
                    let _ = write!(acc, "{:02X}", b);
                    acc
                });
            let _ = writeln!(out, "{:08X}  {:<16}  {}", ann.address, hex, ann.text);
            end = ann.address + ann.len;
        }

        // Labels past the last instruction, e.g. an end marker on an empty
        // composite.
        for (addr, names) in label_at.range(end..) {
            for name in names {
                let _ = writeln!(out, "{:08X}                  {}:", addr, name);
            }
        }

        out
    }
}

/// Configurable resource limits.
///
/// All limits default to generous values that are sufficient for any
/// reasonable patch or routine.
///
/// # Examples
///
/// ```rust
/// use ppc_asm::{ppc, Assembler, AsmError, ResourceLimits};
///
/// let mut asm = Assembler::new();
/// asm.limits(ResourceLimits {
///     max_instructions: 2,
///     ..ResourceLimits::default()
/// });
/// asm.push(ppc::nop())?;
/// asm.push(ppc::nop())?;
/// assert!(matches!(
///     asm.push(ppc::nop()),
///     Err(AsmError::ResourceLimitExceeded { limit: 2, .. })
/// ));
/// # Ok::<(), AsmError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceLimits {
    /// Maximum number of top-level instructions. Default: 1,000,000.
    pub max_instructions: usize,
    /// Maximum number of labeled instructions. Default: 100,000.
    pub max_labels: usize,
    /// Maximum output size in bytes. Default: 16 MiB.
    pub max_output_bytes: usize,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_instructions: 1_000_000,
            max_labels: 100_000,
            max_output_bytes: 16 * 1024 * 1024,
        }
    }
}

/// Builder-pattern assembler.
///
/// # Examples
///
/// ```rust
/// use ppc_asm::{ppc, register::*, Assembler};
///
/// let mut asm = Assembler::new();
/// asm.base_address(0x8000_3000)
///     .define_external("OSReport", 0x8000_6000);
/// asm.push(ppc::stwu(R1, -0x10, R1)?)?;
/// asm.push(ppc::bl("OSReport"))?;
/// asm.push(ppc::addi(R1, R1, 0x10)?)?;
/// asm.push(ppc::blr()?)?;
/// let result = asm.finish()?;
/// assert_eq!(result.len(), 16);
/// # Ok::<(), ppc_asm::AsmError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    base_address: u64,
    externals: SymbolTable,
    instructions: Vec<Instruction>,
    options: LinkOptions,
    /// Off by default to avoid per-instruction String allocations.
    listing_enabled: bool,
    resource_limits: ResourceLimits,
    label_count: usize,
    /// Running total checked against `max_output_bytes` before linking.
    estimated_output_bytes: u64,
}

impl Assembler {
    /// Create an assembler at base address 0 with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set resource limits.
    ///
    /// See [`ResourceLimits`] for the available limits and their defaults.
    pub fn limits(&mut self, limits: ResourceLimits) -> &mut Self {
        self.resource_limits = limits;
        self
    }

    /// Reject distinct labels that share an address instead of warning.
    pub fn strict_labels(&mut self, strict: bool) -> &mut Self {
        self.options.strict_labels = strict;
        self
    }

    /// Record per-instruction text for [`AssemblyResult::listing`].
    pub fn enable_listing(&mut self) -> &mut Self {
        self.listing_enabled = true;
        self
    }

    /// Set the address of the first instruction.
    pub fn base_address(&mut self, addr: u64) -> &mut Self {
        self.base_address = addr;
        self
    }

    /// Define a label outside the sequence at a known absolute address.
    ///
    /// A label of the same name defined in the sequence takes precedence.
    pub fn define_external(&mut self, name: &str, addr: u64) -> &mut Self {
        self.externals.define(name, addr);
        self
    }

    /// Append one instruction.
    ///
    /// # Errors
    ///
    /// Returns [`AsmError::ResourceLimitExceeded`] if the instruction, label
    /// or output byte limit would be exceeded.
    pub fn push(&mut self, instruction: Instruction) -> Result<&mut Self, AsmError> {
        if self.instructions.len() >= self.resource_limits.max_instructions {
            return Err(AsmError::ResourceLimitExceeded {
                resource: String::from("instructions"),
                limit: self.resource_limits.max_instructions,
            });
        }
        if instruction.label().is_some() {
            if self.label_count >= self.resource_limits.max_labels {
                return Err(AsmError::ResourceLimitExceeded {
                    resource: String::from("labels"),
                    limit: self.resource_limits.max_labels,
                });
            }
            self.label_count += 1;
        }
        self.check_output_limit(instruction.byte_count())?;
        self.instructions.push(instruction);
        Ok(self)
    }

    /// Append every instruction of `instructions` in order.
    ///
    /// # Errors
    ///
    /// Stops at the first instruction that exceeds a limit; earlier ones
    /// stay appended.
    pub fn extend<I>(&mut self, instructions: I) -> Result<&mut Self, AsmError>
    where
        I: IntoIterator<Item = Instruction>,
    {
        for instruction in instructions {
            self.push(instruction)?;
        }
        Ok(self)
    }

    /// Number of instructions appended so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether no instructions have been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Bytes the current sequence will emit.
    #[must_use]
    pub fn byte_count(&self) -> u64 {
        linker::byte_count(&self.instructions)
    }

    /// Clear appended instructions, keeping configuration.
    ///
    /// Base address, seed symbols, limits, strict-label mode and listing
    /// stay as configured.
    ///
    /// # Examples
    ///
    /// ```
    /// use ppc_asm::{ppc, Assembler};
    ///
    /// let mut asm = Assembler::new();
    /// asm.push(ppc::nop())?;
    /// asm.reset();
    /// asm.push(ppc::blr()?)?;
    /// let result = asm.finish()?;
    /// assert_eq!(result.bytes(), &[0x4E, 0x80, 0x00, 0x20]);
    /// # Ok::<(), ppc_asm::AsmError>(())
    /// ```
    pub fn reset(&mut self) -> &mut Self {
        self.instructions.clear();
        self.label_count = 0;
        self.estimated_output_bytes = 0;
        self
    }

    fn check_output_limit(&mut self, additional: u64) -> Result<(), AsmError> {
        let total = self.estimated_output_bytes + additional;
        if total > self.resource_limits.max_output_bytes as u64 {
            return Err(AsmError::ResourceLimitExceeded {
                resource: String::from("output bytes"),
                limit: self.resource_limits.max_output_bytes,
            });
        }
        self.estimated_output_bytes = total;
        Ok(())
    }

    /// Finalize assembly: assign label addresses, emit bytes, return result.
    ///
    /// # Errors
    ///
    /// Returns [`AsmError`] if a label is undefined, a computed field does
    /// not fit, strict-label mode finds an alias, or the output limit is
    /// exceeded.
    pub fn finish(self) -> Result<AssemblyResult, AsmError> {
        log::debug!(
            "assembling {} instructions at 0x{:08X} with {} external symbols",
            self.instructions.len(),
            self.base_address,
            self.externals.len()
        );

        let (bytes, symbols) = linker::link(
            self.base_address,
            &self.instructions,
            Some(&self.externals),
            &self.options,
        )?;

        if bytes.len() > self.resource_limits.max_output_bytes {
            return Err(AsmError::ResourceLimitExceeded {
                resource: String::from("output bytes"),
                limit: self.resource_limits.max_output_bytes,
            });
        }

        let labels = self.collect_labels(&symbols);
        let annotations = if self.listing_enabled {
            self.build_annotations()?
        } else {
            Vec::new()
        };

        Ok(AssemblyResult {
            bytes,
            labels,
            base_address: self.base_address,
            annotations,
        })
    }

    fn collect_labels(&self, symbols: &SymbolTable) -> Vec<(String, u64)> {
        let names: BTreeSet<&str> = self
            .instructions
            .iter()
            .filter_map(Instruction::label)
            .collect();
        let mut labels: Vec<(String, u64)> = names
            .into_iter()
            .filter_map(|name| symbols.get(name).map(|addr| (name.to_string(), addr)))
            .collect();
        labels.sort_by(|(a_name, a_addr), (b_name, b_addr)| {
            a_addr.cmp(b_addr).then_with(|| a_name.cmp(b_name))
        });
        labels
    }

    fn build_annotations(&self) -> Result<Vec<Annotation>, AsmError> {
        let mut address = self.base_address;
        let mut annotations = Vec::with_capacity(self.instructions.len());
        for instr in &self.instructions {
            let len = instr.byte_count();
            if len > 0 {
                annotations.push(Annotation {
                    address,
                    len,
                    text: instr.to_string(),
                });
            }
            address = advance_address(address, len)?;
        }
        Ok(annotations)
    }
}
