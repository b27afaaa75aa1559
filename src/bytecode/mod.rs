/*!

  The machine has a four bit word for everything: operands, results, and the selector that
  picks one of sixteen operations. An instruction is three independent four bit fields,

    A:        4 bits   first operand
    B:        4 bits   second operand
    S:        4 bits   selector (opcode)

  and exists in three forms:

    assembly  `X=A` / `Y=5` / `W=AeB` lines, see `assembly`
    text      three upper case hex digits in the order A, B, S, e.g. `A5B`, one per line of
              an encoded program
    binary    a 16 bit `Word`, `[Reserved:4][A:4][B:4][S:4]`, see `binary`

  The assembler's output is stored in a `Program` as binary words, and the text file is
  rendered from those words. The loader reads the text form and stores the binary form in the
  same way, and the machine decodes every word it fetches. Both directions go through
  `encode_instruction`/`decode_instruction`, so there is a single definition of the layout.

  The selector is kept as a `Nibble` inside `Instruction` rather than as an `Operation`. All
  sixteen selector values are defined, so the conversion cannot fail for a decoded field,
  but the machine still goes through the fallible conversion and treats a failure as an
  `UnknownOpcode`.

*/

pub mod assembly;
mod binary;
pub mod disasm;
mod instruction;

pub use binary::{encode_instruction, decode_instruction, Word, INSTRUCTION_MASK};
pub use instruction::{evaluate, Instruction, Operation, OPERATION_COUNT};
pub use assembly::{assemble, Assembler, MnemonicMode};
