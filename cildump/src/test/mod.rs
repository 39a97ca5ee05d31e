//! Crafted PE images shared by unit tests across the crate.
//!
//! Real assemblies are too unwieldy to carry as fixtures, so tests build
//! their images byte by byte. [`minimal_pe`] produces a bare managed PE
//! shell; [`hello_image`] fills one with a small but complete metadata
//! block (tables, heaps and two method bodies) that exercises the whole
//! parsing path.

/// RVA of the `Main` method body inside [`hello_image`].
pub(crate) const MAIN_BODY_RVA: u32 = 0x1080;
/// RVA of the `.ctor` method body inside [`hello_image`].
pub(crate) const CTOR_BODY_RVA: u32 = 0x1090;

fn push_u16(data: &mut Vec<u8>, value: u16) {
    data.extend_from_slice(&value.to_le_bytes());
}

fn push_u32(data: &mut Vec<u8>, value: u32) {
    data.extend_from_slice(&value.to_le_bytes());
}

/// Add a NUL terminated string to a `#Strings` heap under construction,
/// returning its heap index.
fn add_string(heap: &mut Vec<u8>, value: &str) -> u16 {
    let offset = heap.len() as u16;
    heap.extend_from_slice(value.as_bytes());
    heap.push(0);
    offset
}

/// Add a length prefixed blob to a `#Blob` heap under construction,
/// returning its heap index. Only fits blobs below 128 bytes.
fn add_blob(heap: &mut Vec<u8>, value: &[u8]) -> u16 {
    let offset = heap.len() as u16;
    heap.push(value.len() as u8);
    heap.extend_from_slice(value);
    offset
}

/// 64-byte DOS header, PE signature at 0x40, COFF header, PE32 optional
/// header with 16 data directories (CLR at index 14), one ".text" section
/// mapping RVA 0x1000 to file offset 0x200 for the rest of the image.
pub(crate) fn pe_shell(file_size: usize, clr_rva: u32, clr_size: u32) -> Vec<u8> {
    let section_size = (file_size - 0x200) as u32;
    let mut image = vec![0u8; file_size];

    image[0] = b'M';
    image[1] = b'Z';
    image[0x3C] = 0x40; // e_lfanew

    image[0x40..0x44].copy_from_slice(b"PE\0\0");

    // COFF header
    image[0x44..0x46].copy_from_slice(&0x014C_u16.to_le_bytes()); // machine: i386
    image[0x46..0x48].copy_from_slice(&1_u16.to_le_bytes()); // sections
    image[0x54..0x56].copy_from_slice(&0x00E0_u16.to_le_bytes()); // optional header size
    image[0x56..0x58].copy_from_slice(&0x2102_u16.to_le_bytes()); // characteristics: EXE | DLL | 32BIT

    // Optional header (PE32)
    let opt = 0x58;
    image[opt..opt + 2].copy_from_slice(&0x010B_u16.to_le_bytes());
    image[opt + 28..opt + 32].copy_from_slice(&0x0040_0000_u32.to_le_bytes()); // image base
    image[opt + 32..opt + 36].copy_from_slice(&0x1000_u32.to_le_bytes()); // section alignment
    image[opt + 36..opt + 40].copy_from_slice(&0x200_u32.to_le_bytes()); // file alignment
    image[opt + 56..opt + 60].copy_from_slice(&0x3000_u32.to_le_bytes()); // size of image
    image[opt + 60..opt + 64].copy_from_slice(&0x200_u32.to_le_bytes()); // size of headers
    image[opt + 68..opt + 70].copy_from_slice(&3_u16.to_le_bytes()); // subsystem: CUI
    image[opt + 92..opt + 96].copy_from_slice(&16_u32.to_le_bytes()); // directory count

    // Data directory 14: CLR runtime header
    let clr_dir = opt + 96 + 14 * 8;
    image[clr_dir..clr_dir + 4].copy_from_slice(&clr_rva.to_le_bytes());
    image[clr_dir + 4..clr_dir + 8].copy_from_slice(&clr_size.to_le_bytes());

    // Section table: ".text", mapped at RVA 0x1000
    let sect = opt + 96 + 16 * 8;
    image[sect..sect + 5].copy_from_slice(b".text");
    image[sect + 8..sect + 12].copy_from_slice(&section_size.to_le_bytes()); // virtual size
    image[sect + 12..sect + 16].copy_from_slice(&0x1000_u32.to_le_bytes()); // virtual address
    image[sect + 16..sect + 20].copy_from_slice(&section_size.to_le_bytes()); // raw size
    image[sect + 20..sect + 24].copy_from_slice(&0x200_u32.to_le_bytes()); // raw pointer
    image[sect + 36..sect + 40].copy_from_slice(&0x6000_0020_u32.to_le_bytes()); // characteristics

    image
}

/// A managed PE shell without any metadata content behind the CLR
/// directory.
pub(crate) fn minimal_pe(clr_rva: u32, clr_size: u32) -> Vec<u8> {
    pe_shell(0x400, clr_rva, clr_size)
}

/// A complete single-module assembly: `MyApp`, version 1.2.3.4, holding
/// `MyApp.Program` with a static field `counter`, a static `Main` and an
/// instance `.ctor`, referencing `mscorlib` for `System.Object`.
pub(crate) fn hello_image() -> Vec<u8> {
    build_image(true)
}

/// The same image as [`hello_image`] but without an `Assembly` row, making
/// it a plain module rather than an assembly.
pub(crate) fn module_only_image() -> Vec<u8> {
    build_image(false)
}

fn build_image(with_assembly: bool) -> Vec<u8> {
    // Heaps
    let mut strings = vec![0u8];
    let module_name = add_string(&mut strings, "MyApp.dll");
    let object_name = add_string(&mut strings, "Object");
    let system_ns = add_string(&mut strings, "System");
    let module_type = add_string(&mut strings, "<Module>");
    let program_name = add_string(&mut strings, "Program");
    let myapp = add_string(&mut strings, "MyApp");
    let counter_name = add_string(&mut strings, "counter");
    let main_name = add_string(&mut strings, "Main");
    let ctor_name = add_string(&mut strings, ".ctor");
    let mscorlib_name = add_string(&mut strings, "mscorlib");
    while strings.len() % 4 != 0 {
        strings.push(0);
    }

    let mut blob = vec![0u8];
    let field_sig = add_blob(&mut blob, &[0x06, 0x08]); // FIELD, int32
    let main_sig = add_blob(&mut blob, &[0x00, 0x00, 0x01]); // default, no params, void
    let ctor_sig = add_blob(&mut blob, &[0x20, 0x00, 0x01]); // hasthis, no params, void
    let mscorlib_key = add_blob(&mut blob, &[0xB7, 0x7A, 0x5C, 0x56, 0x19, 0x34, 0xE0, 0x89]);
    while blob.len() % 4 != 0 {
        blob.push(0);
    }

    let userstrings = vec![0u8, 0, 0, 0];
    let guids: Vec<u8> = (1..=16).collect();

    // Table rows, all heap and table indexes 2 bytes wide
    let mut rows = Vec::new();

    // Module
    push_u16(&mut rows, 0); // generation
    push_u16(&mut rows, module_name);
    push_u16(&mut rows, 1); // mvid
    push_u16(&mut rows, 0); // encid
    push_u16(&mut rows, 0); // encbaseid

    // TypeRef: System.Object, scope AssemblyRef row 1
    push_u16(&mut rows, (1 << 2) | 2);
    push_u16(&mut rows, object_name);
    push_u16(&mut rows, system_ns);

    // TypeDef 1: <Module>
    push_u32(&mut rows, 0);
    push_u16(&mut rows, module_type);
    push_u16(&mut rows, 0);
    push_u16(&mut rows, 0); // extends: null
    push_u16(&mut rows, 1); // field list
    push_u16(&mut rows, 1); // method list

    // TypeDef 2: MyApp.Program, public, beforefieldinit, extends TypeRef 1
    push_u32(&mut rows, 0x0010_0001);
    push_u16(&mut rows, program_name);
    push_u16(&mut rows, myapp);
    push_u16(&mut rows, (1 << 2) | 1);
    push_u16(&mut rows, 1);
    push_u16(&mut rows, 1);

    // Field: private static int32 counter
    push_u16(&mut rows, 0x0011);
    push_u16(&mut rows, counter_name);
    push_u16(&mut rows, field_sig);

    // MethodDef 1: public hidebysig static void Main()
    push_u32(&mut rows, MAIN_BODY_RVA);
    push_u16(&mut rows, 0); // impl flags
    push_u16(&mut rows, 0x0096);
    push_u16(&mut rows, main_name);
    push_u16(&mut rows, main_sig);
    push_u16(&mut rows, 1); // param list

    // MethodDef 2: public hidebysig specialname rtspecialname instance void .ctor()
    push_u32(&mut rows, CTOR_BODY_RVA);
    push_u16(&mut rows, 0);
    push_u16(&mut rows, 0x1886);
    push_u16(&mut rows, ctor_name);
    push_u16(&mut rows, ctor_sig);
    push_u16(&mut rows, 1);

    if with_assembly {
        // Assembly: MyApp 1.2.3.4, SHA-1
        push_u32(&mut rows, 0x8004);
        push_u16(&mut rows, 1);
        push_u16(&mut rows, 2);
        push_u16(&mut rows, 3);
        push_u16(&mut rows, 4);
        push_u32(&mut rows, 0); // flags
        push_u16(&mut rows, 0); // public key
        push_u16(&mut rows, myapp);
        push_u16(&mut rows, 0); // culture
    }

    // AssemblyRef: mscorlib 4.0.0.0
    push_u16(&mut rows, 4);
    push_u16(&mut rows, 0);
    push_u16(&mut rows, 0);
    push_u16(&mut rows, 0);
    push_u32(&mut rows, 0); // flags
    push_u16(&mut rows, mscorlib_key);
    push_u16(&mut rows, mscorlib_name);
    push_u16(&mut rows, 0); // culture
    push_u16(&mut rows, 0); // hash value

    let mut valid: u64 = (1 << 0x00) | (1 << 0x01) | (1 << 0x02) | (1 << 0x04) | (1 << 0x06);
    let mut counts: Vec<u32> = vec![1, 1, 2, 1, 2];
    if with_assembly {
        valid |= 1 << 0x20;
        counts.push(1);
    }
    valid |= 1 << 0x23;
    counts.push(1);

    let mut tables = Vec::new();
    push_u32(&mut tables, 0); // reserved
    tables.push(2); // major version
    tables.push(0); // minor version
    tables.push(0); // heap sizes: everything small
    tables.push(1); // reserved
    tables.extend_from_slice(&valid.to_le_bytes());
    tables.extend_from_slice(&0_u64.to_le_bytes()); // sorted
    for count in &counts {
        push_u32(&mut tables, *count);
    }
    tables.extend_from_slice(&rows);

    // Metadata root with the stream directory, streams appended in order
    let streams: [(&str, &[u8]); 5] = [
        ("#~", &tables),
        ("#Strings", &strings),
        ("#US", &userstrings),
        ("#GUID", &guids),
        ("#Blob", &blob),
    ];

    let headers_len: usize = streams
        .iter()
        .map(|(name, _)| 8 + ((name.len() + 1 + 3) & !3))
        .sum();

    let mut metadata = Vec::new();
    push_u32(&mut metadata, 0x424A_5342); // BSJB
    push_u16(&mut metadata, 1);
    push_u16(&mut metadata, 1);
    push_u32(&mut metadata, 0); // reserved
    push_u32(&mut metadata, 12); // version length
    metadata.extend_from_slice(b"v4.0.30319\0\0");
    push_u16(&mut metadata, 0); // flags
    push_u16(&mut metadata, streams.len() as u16);

    let mut stream_offset = (metadata.len() + headers_len) as u32;
    for (name, data) in &streams {
        push_u32(&mut metadata, stream_offset);
        push_u32(&mut metadata, data.len() as u32);
        metadata.extend_from_slice(name.as_bytes());
        metadata.push(0);
        while metadata.len() % 4 != 0 {
            metadata.push(0);
        }
        stream_offset += data.len() as u32;
    }
    for (_, data) in &streams {
        metadata.extend_from_slice(data);
    }

    // Assemble the image: COR20 at RVA 0x1000, bodies at 0x1080/0x1090,
    // metadata at 0x1100. The section maps RVA 0x1000 to offset 0x200.
    let mut image = pe_shell(0x800, 0x1000, 72);

    let cor20 = 0x200;
    image[cor20..cor20 + 4].copy_from_slice(&72_u32.to_le_bytes());
    image[cor20 + 4..cor20 + 6].copy_from_slice(&2_u16.to_le_bytes());
    image[cor20 + 6..cor20 + 8].copy_from_slice(&5_u16.to_le_bytes());
    image[cor20 + 8..cor20 + 12].copy_from_slice(&0x1100_u32.to_le_bytes());
    image[cor20 + 12..cor20 + 16].copy_from_slice(&(metadata.len() as u32).to_le_bytes());
    image[cor20 + 16..cor20 + 20].copy_from_slice(&1_u32.to_le_bytes()); // ILONLY
    image[cor20 + 20..cor20 + 24].copy_from_slice(&0x0600_0001_u32.to_le_bytes());

    // Tiny bodies: Main is nop/ret, .ctor is ldarg.0/ret
    image[0x280..0x283].copy_from_slice(&[0x0A, 0x00, 0x2A]);
    image[0x290..0x293].copy_from_slice(&[0x0A, 0x02, 0x2A]);

    image[0x300..0x300 + metadata.len()].copy_from_slice(&metadata);
    image
}
