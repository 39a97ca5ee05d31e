//! The in-process IL renderer.
//!
//! [`render_il`] walks a parsed [`CilImage`] and produces an ildasm-style
//! listing: assembly-extern blocks, the assembly and module headers, then
//! every type with its fields and methods, method bodies disassembled
//! instruction by instruction. Member ordering is controlled by
//! [`MemberOrder`]; with the default lexicographic ordering the listing is
//! byte-identical across compiler runs that did not change the source.
//!
//! The module-version GUID is deliberately absent from the output. It is
//! regenerated on every compilation and would make otherwise identical
//! builds diff as different.

use crate::{
    disassembler::{decode_stream, FlowType, Immediate, Instruction, Operand},
    dump::order::MemberOrder,
    file::parser::Parser,
    metadata::{
        cilimage::CilImage,
        method::{
            ExceptionHandler, ExceptionHandlerFlags, MethodAccessFlags, MethodBody,
            MethodImplCodeType, MethodImplManagement, MethodModifiers,
        },
        signatures::{SignatureMethod, SignatureParser, TypeSignature},
        streams::TablesHeader,
        tables::{
            AssemblyRaw, AssemblyRefRaw, FieldAttributes, FieldRaw, MemberRefRaw, MethodDefRaw,
            ModuleRaw, ParamRaw, StandAloneSigRaw, TableId, TypeAttributes, TypeDefRaw,
            TypeRefRaw, TypeSpecRaw,
        },
        token::Token,
    },
    Result,
};

/// The `Flags` bit marking a full public key rather than a token.
const ASSEMBLY_FLAGS_PUBLIC_KEY: u32 = 0x0001;

/// Longest TypeRef nesting chain the renderer will follow.
const MAX_NESTING_DEPTH: usize = 64;

/// Render the IL listing for one parsed image.
///
/// The output covers assembly-extern references, the assembly header (when
/// the image carries a manifest), the module header, and the full module
/// contents with disassembled method bodies.
///
/// # Errors
/// Returns an error if the image has no tables stream or a structure the
/// listing depends on (heap entry, signature blob, method body) cannot be
/// decoded.
pub fn render_il(image: &CilImage, order: MemberOrder) -> Result<String> {
    Renderer::new(image, order)?.render()
}

/// One type with its member ranges already resolved.
///
/// Ranges are derived from the physical row order before any sorting, so
/// reordering the entries cannot detach members from their owners. Member
/// names are resolved up front; the ordering pass compares them without
/// touching the heaps again.
struct TypeEntry {
    fullname: String,
    token: Token,
    flags: u32,
    extends: Option<Token>,
    fields: Vec<FieldEntry>,
    methods: Vec<MethodEntry>,
}

struct FieldEntry {
    name: String,
    row: FieldRaw,
}

struct MethodEntry {
    name: String,
    row: MethodDefRaw,
}

struct Renderer<'a> {
    image: &'a CilImage<'a>,
    tables: &'a TablesHeader<'a>,
    order: MemberOrder,
    /// All TypeDef rows in physical order, for member-list range walks.
    typedefs: Vec<TypeDefRaw>,
    /// All MethodDef rows in physical order, for param-list range walks.
    methods: Vec<MethodDefRaw>,
}

impl<'a> Renderer<'a> {
    fn new(image: &'a CilImage<'a>, order: MemberOrder) -> Result<Renderer<'a>> {
        let tables = image
            .tables()
            .ok_or_else(|| malformed_error!("Image carries no metadata tables stream"))?;

        let typedefs = tables
            .table::<TypeDefRaw>(TableId::TypeDef)
            .map(|table| table.iter().collect())
            .unwrap_or_default();
        let methods = tables
            .table::<MethodDefRaw>(TableId::MethodDef)
            .map(|table| table.iter().collect())
            .unwrap_or_default();

        Ok(Renderer {
            image,
            tables,
            order,
            typedefs,
            methods,
        })
    }

    fn render(&self) -> Result<String> {
        let mut out = String::new();
        self.assembly_references(&mut out)?;
        self.assembly_header(&mut out)?;
        self.module_header(&mut out)?;
        out.push('\n');
        self.module_contents(&mut out)?;
        Ok(out)
    }

    fn assembly_references(&self, out: &mut String) -> Result<()> {
        let Some(table) = self.tables.table::<AssemblyRefRaw>(TableId::AssemblyRef) else {
            return Ok(());
        };

        for reference in &table {
            out.push_str(&format!(
                ".assembly extern '{}' {{\n",
                self.string(reference.name)?
            ));
            if reference.public_key_or_token != 0 {
                let directive = if reference.flags & ASSEMBLY_FLAGS_PUBLIC_KEY != 0 {
                    ".publickey"
                } else {
                    ".publickeytoken"
                };
                out.push_str(&format!(
                    "  {directive} = ({})\n",
                    hex_bytes(self.blob(reference.public_key_or_token)?)
                ));
            }
            if reference.culture != 0 {
                out.push_str(&format!(
                    "  .culture '{}'\n",
                    self.string(reference.culture)?
                ));
            }
            out.push_str(&format!(
                "  .ver {}:{}:{}:{}\n",
                reference.major_version,
                reference.minor_version,
                reference.build_number,
                reference.revision_number
            ));
            out.push_str("}\n");
        }
        Ok(())
    }

    fn assembly_header(&self, out: &mut String) -> Result<()> {
        let Some(assembly) = self
            .tables
            .table::<AssemblyRaw>(TableId::Assembly)
            .and_then(|table| table.get(1))
        else {
            return Ok(());
        };

        out.push_str(&format!(".assembly '{}' {{\n", self.string(assembly.name)?));
        out.push_str(&format!(
            "  .hash algorithm 0x{:08x}\n",
            assembly.hash_alg_id
        ));
        if assembly.public_key != 0 {
            out.push_str(&format!(
                "  .publickey = ({})\n",
                hex_bytes(self.blob(assembly.public_key)?)
            ));
        }
        if assembly.culture != 0 {
            out.push_str(&format!("  .culture '{}'\n", self.string(assembly.culture)?));
        }
        out.push_str(&format!(
            "  .ver {}:{}:{}:{}\n",
            assembly.major_version,
            assembly.minor_version,
            assembly.build_number,
            assembly.revision_number
        ));
        out.push_str("}\n");
        Ok(())
    }

    fn module_header(&self, out: &mut String) -> Result<()> {
        let Some(module) = self
            .tables
            .table::<ModuleRaw>(TableId::Module)
            .and_then(|table| table.get(1))
        else {
            return Ok(());
        };

        // No MVID line here, see the module documentation.
        out.push_str(&format!(".module {}\n", self.string(module.name)?));
        Ok(())
    }

    fn module_contents(&self, out: &mut String) -> Result<()> {
        let mut entries = self.collect_types()?;

        // Global members live in the synthetic <Module> type, always the
        // first row. They are listed without a class wrapper.
        let global = (!entries.is_empty() && entries[0].fullname == "<Module>")
            .then(|| entries.remove(0));

        self.order
            .apply(&mut entries, |t| &t.fullname, |t| t.token.value());

        if let Some(mut global) = global {
            self.sort_members(&mut global);
            for field in &global.fields {
                self.field(out, field)?;
            }
            if !global.fields.is_empty() {
                out.push('\n');
            }
            for method in &global.methods {
                self.method(out, method)?;
            }
        }

        for entry in &mut entries {
            self.sort_members(entry);
            self.class(out, entry)?;
        }
        Ok(())
    }

    fn collect_types(&self) -> Result<Vec<TypeEntry>> {
        let field_table = self.tables.table::<FieldRaw>(TableId::Field);
        let method_table = self.tables.table::<MethodDefRaw>(TableId::MethodDef);
        let fields_end = self.tables.table_row_count(TableId::Field) + 1;
        let methods_end = self.tables.table_row_count(TableId::MethodDef) + 1;

        let mut entries = Vec::with_capacity(self.typedefs.len());
        for (index, row) in self.typedefs.iter().enumerate() {
            let next = self.typedefs.get(index + 1);
            let fields_to = next.map_or(fields_end, |n| n.field_list);
            let methods_to = next.map_or(methods_end, |n| n.method_list);

            let mut fields = Vec::new();
            if let Some(table) = &field_table {
                for rid in row.field_list..fields_to {
                    if let Some(field) = table.get(rid) {
                        fields.push(FieldEntry {
                            name: self.string(field.name)?.to_string(),
                            row: field,
                        });
                    }
                }
            }

            let mut methods = Vec::new();
            if let Some(table) = &method_table {
                for rid in row.method_list..methods_to {
                    if let Some(method) = table.get(rid) {
                        methods.push(MethodEntry {
                            name: self.string(method.name)?.to_string(),
                            row: method,
                        });
                    }
                }
            }

            entries.push(TypeEntry {
                fullname: self.typedef_fullname(row)?,
                token: row.token,
                flags: row.flags,
                extends: (!row.extends.is_null()).then_some(row.extends.token),
                fields,
                methods,
            });
        }
        Ok(entries)
    }

    fn sort_members(&self, entry: &mut TypeEntry) {
        self.order
            .apply(&mut entry.fields, |f| &f.name, |f| f.row.token.value());
        self.order
            .apply(&mut entry.methods, |m| &m.name, |m| m.row.token.value());
    }

    fn class(&self, out: &mut String, entry: &TypeEntry) -> Result<()> {
        let visibility =
            if entry.flags & TypeAttributes::VISIBILITY_MASK == TypeAttributes::PUBLIC {
                "public"
            } else {
                "private"
            };

        out.push_str(&format!(".class {visibility} auto ansi"));
        if entry.flags & TypeAttributes::CLASS_SEMANTICS_MASK == TypeAttributes::INTERFACE {
            out.push_str(" interface abstract");
        }
        out.push_str(&format!(" {}", entry.fullname));

        if let Some(extends) = entry.extends {
            let base = self.type_fullname(extends)?;
            if base != "System.Object" {
                out.push_str(&format!(" extends {base}"));
            }
        }
        out.push('\n');
        out.push_str("{\n");

        for field in &entry.fields {
            self.field(out, field)?;
        }
        if !entry.fields.is_empty() {
            out.push('\n');
        }
        for method in &entry.methods {
            self.method(out, method)?;
        }

        out.push_str("} // end of class\n\n");
        Ok(())
    }

    fn field(&self, out: &mut String, entry: &FieldEntry) -> Result<()> {
        let signature =
            SignatureParser::new(self.blob(entry.row.signature)?).parse_field_signature()?;

        out.push_str(&format!("  .field {}", field_access(entry.row.flags)));
        if entry.row.flags & FieldAttributes::STATIC != 0 {
            out.push_str(" static");
        }
        if entry.row.flags & FieldAttributes::INIT_ONLY != 0 {
            out.push_str(" initonly");
        }
        if entry.row.flags & FieldAttributes::LITERAL != 0 {
            out.push_str(" literal");
        }
        out.push_str(&format!(
            " {} {}\n",
            self.type_name(&signature.base)?,
            entry.name
        ));
        Ok(())
    }

    fn method(&self, out: &mut String, entry: &MethodEntry) -> Result<()> {
        let signature =
            SignatureParser::new(self.blob(entry.row.signature)?).parse_method_signature()?;

        self.method_header(out, entry, &signature)?;

        if entry.row.rva == 0 {
            // Abstract, runtime-provided or forwarded: no body in the image.
            out.push_str("  {\n");
            out.push_str(&format!("  }} // end of method {}\n\n", entry.name));
            return Ok(());
        }

        let (body, code) = self.image.method_body(entry.row.rva)?;

        out.push_str("  {\n");
        if entry.row.token.value() == self.image.cor20().entry_point_token {
            out.push_str("    .entrypoint\n");
        }
        // Tiny bodies do not encode a stack depth; ECMA-335 II.25.4.2
        // fixes it at 8.
        let max_stack = if body.is_fat { body.max_stack } else { 8 };
        out.push_str(&format!("    .maxstack {max_stack}\n"));

        self.locals(out, &body)?;
        exception_regions(out, &body.exception_handlers, |token| {
            self.type_fullname(token)
                .unwrap_or_else(|_| "[?]".to_string())
        });

        let mut parser = Parser::new(code);
        for instruction in decode_stream(&mut parser, 0)? {
            out.push_str(&self.instruction_line(&instruction)?);
        }

        out.push_str(&format!("  }} // end of method {}\n\n", entry.name));
        Ok(())
    }

    fn method_header(
        &self,
        out: &mut String,
        entry: &MethodEntry,
        signature: &SignatureMethod,
    ) -> Result<()> {
        let flags = entry.row.flags;
        let modifiers = MethodModifiers::from_method_flags(flags);

        out.push_str(&format!(
            "  .method {}",
            method_access(MethodAccessFlags::from_method_flags(flags))
        ));
        if modifiers.contains(MethodModifiers::HIDE_BY_SIG) {
            out.push_str(" hidebysig");
        }
        if modifiers.contains(MethodModifiers::STATIC) {
            out.push_str(" static");
        }
        if modifiers.contains(MethodModifiers::VIRTUAL) {
            out.push_str(" virtual");
        }
        if modifiers.contains(MethodModifiers::FINAL) {
            out.push_str(" final");
        }
        if modifiers.contains(MethodModifiers::ABSTRACT) {
            out.push_str(" abstract");
        }
        if modifiers.contains(MethodModifiers::SPECIAL_NAME) {
            out.push_str(" specialname");
        }
        if modifiers.contains(MethodModifiers::RTSPECIAL_NAME) {
            out.push_str(" rtspecialname");
        }
        if modifiers.contains(MethodModifiers::PINVOKE_IMPL) {
            out.push_str(" pinvokeimpl");
        }
        if signature.has_this {
            out.push_str(" instance");
        }

        let mut return_type = self.type_name(&signature.return_type.base)?;
        if signature.return_type.by_ref {
            return_type.push('&');
        }
        out.push_str(&format!(" {return_type} {}(", entry.name));

        let params = self.param_rows(&entry.row);
        for (position, param) in signature.params.iter().enumerate() {
            if position > 0 {
                out.push_str(", ");
            }
            let mut rendered = self.type_name(&param.base)?;
            if param.by_ref {
                rendered.push('&');
            }
            // Param rows are keyed by 1-based sequence; 0 names the return.
            let sequence = position as u32 + 1;
            if let Some(row) = params.iter().find(|p| p.sequence == sequence) {
                let name = self.string(row.name)?;
                if !name.is_empty() {
                    rendered.push(' ');
                    rendered.push_str(name);
                }
            }
            out.push_str(&rendered);
        }
        out.push(')');

        let code_type = MethodImplCodeType::from_impl_flags(entry.row.impl_flags);
        if code_type == MethodImplCodeType::IL {
            out.push_str(" cil");
        } else if code_type == MethodImplCodeType::NATIVE {
            out.push_str(" native");
        } else if code_type == MethodImplCodeType::RUNTIME {
            out.push_str(" runtime");
        }

        if MethodImplManagement::from_impl_flags(entry.row.impl_flags)
            .contains(MethodImplManagement::UNMANAGED)
        {
            out.push_str(" unmanaged");
        } else {
            out.push_str(" managed");
        }
        out.push('\n');
        Ok(())
    }

    /// The Param rows belonging to one method, by physical range walk.
    fn param_rows(&self, method: &MethodDefRaw) -> Vec<ParamRaw> {
        let Some(table) = self.tables.table::<ParamRaw>(TableId::Param) else {
            return Vec::new();
        };
        let params_to = self
            .methods
            .get(method.rid as usize)
            .map_or(self.tables.table_row_count(TableId::Param) + 1, |next| {
                next.param_list
            });

        (method.param_list..params_to)
            .filter_map(|rid| table.get(rid))
            .collect()
    }

    fn locals(&self, out: &mut String, body: &MethodBody) -> Result<()> {
        if body.local_var_sig_token == 0 {
            return Ok(());
        }

        let token = Token::new(body.local_var_sig_token);
        let row = self
            .tables
            .table::<StandAloneSigRaw>(TableId::StandAloneSig)
            .and_then(|table| table.get(token.row()))
            .ok_or_else(|| malformed_error!("Local variable signature {} not found", token))?;

        let signature =
            SignatureParser::new(self.blob(row.signature)?).parse_local_var_signature()?;
        if signature.locals.is_empty() {
            return Ok(());
        }

        if body.is_init_local {
            out.push_str("    .locals init (\n");
        } else {
            out.push_str("    .locals (\n");
        }
        let count = signature.locals.len();
        for (index, local) in signature.locals.iter().enumerate() {
            let mut rendered = self.type_name(&local.base)?;
            if local.is_byref {
                rendered.push('&');
            }
            if local.is_pinned {
                rendered.push_str(" pinned");
            }
            let comma = if index + 1 < count { "," } else { "" };
            out.push_str(&format!("      [{index}] {rendered} V_{index}{comma}\n"));
        }
        out.push_str("    )\n");
        Ok(())
    }

    fn instruction_line(&self, instruction: &Instruction) -> Result<String> {
        let operand = self.operand_text(instruction)?;
        if operand.is_empty() {
            Ok(format!(
                "    IL_{:04x}: {}\n",
                instruction.offset, instruction.mnemonic
            ))
        } else {
            Ok(format!(
                "    IL_{:04x}: {:<12} {}\n",
                instruction.offset, instruction.mnemonic, operand
            ))
        }
    }

    fn operand_text(&self, instruction: &Instruction) -> Result<String> {
        // Branches show the resolved label, not the raw relative distance.
        let is_branch = matches!(
            instruction.flow_type,
            FlowType::ConditionalBranch | FlowType::UnconditionalBranch
        );
        if is_branch {
            if let Some(&target) = instruction.branch_targets.first() {
                return Ok(format!("IL_{target:04x}"));
            }
        }

        Ok(match &instruction.operand {
            Operand::None => String::new(),
            Operand::Immediate(immediate) => immediate_text(immediate),
            Operand::Token(token) => match self.resolve_token(*token)? {
                Some(name) => name,
                None => format!("(0x{:08X})", token.value()),
            },
            Operand::Switch(_) => {
                let labels: Vec<String> = instruction
                    .branch_targets
                    .iter()
                    .map(|target| format!("IL_{target:04x}"))
                    .collect();
                format!("({})", labels.join(", "))
            }
        })
    }

    /// Resolve a metadata token to a display name, or `None` for tables
    /// the listing shows as raw token values.
    fn resolve_token(&self, token: Token) -> Result<Option<String>> {
        match token.table() {
            // TypeRef / TypeDef / TypeSpec
            0x01 | 0x02 | 0x1B => Ok(Some(self.type_fullname(token)?)),
            // Field
            0x04 => {
                let Some(field) = self
                    .tables
                    .table::<FieldRaw>(TableId::Field)
                    .and_then(|table| table.get(token.row()))
                else {
                    return Ok(None);
                };
                let owner = self.owner_of(token.row(), |t| t.field_list)?;
                Ok(Some(format!("{owner}::{}", self.string(field.name)?)))
            }
            // MethodDef
            0x06 => {
                let Some(method) = self
                    .tables
                    .table::<MethodDefRaw>(TableId::MethodDef)
                    .and_then(|table| table.get(token.row()))
                else {
                    return Ok(None);
                };
                let owner = self.owner_of(token.row(), |t| t.method_list)?;
                Ok(Some(format!("{owner}::{}", self.string(method.name)?)))
            }
            // MemberRef
            0x0A => {
                let Some(member) = self
                    .tables
                    .table::<MemberRefRaw>(TableId::MemberRef)
                    .and_then(|table| table.get(token.row()))
                else {
                    return Ok(None);
                };
                let name = self.string(member.name)?;
                if member.class.is_null() {
                    return Ok(Some(name.to_string()));
                }
                let class = match member.class.tag {
                    TableId::TypeRef | TableId::TypeDef | TableId::TypeSpec => {
                        self.type_fullname(member.class.token)?
                    }
                    TableId::ModuleRef | TableId::MethodDef => match self
                        .resolve_token(member.class.token)?
                    {
                        Some(resolved) => resolved,
                        None => return Ok(Some(name.to_string())),
                    },
                    _ => return Ok(Some(name.to_string())),
                };
                Ok(Some(format!("{class}::{name}")))
            }
            // UserString; the row is a byte offset into the #US heap. A
            // stale offset falls back to the raw token form.
            0x70 => Ok(self
                .image
                .userstrings()
                .and_then(|heap| heap.get(token.row() as usize).ok())
                .map(|decoded| quoted_string(&decoded.to_string_lossy()))),
            _ => Ok(None),
        }
    }

    /// The fullname of the type owning the member with row id `rid`,
    /// where `start` picks the member-list column to walk.
    fn owner_of(&self, rid: u32, start: impl Fn(&TypeDefRaw) -> u32) -> Result<String> {
        // Member lists are monotonic; the owner is the last type whose
        // list starts at or before the member.
        match self.typedefs.iter().rev().find(|t| start(t) <= rid) {
            Some(owner) => self.typedef_fullname(owner),
            None => Ok("<Module>".to_string()),
        }
    }

    fn typedef_fullname(&self, row: &TypeDefRaw) -> Result<String> {
        let name = self.string(row.type_name)?;
        let namespace = self.string(row.type_namespace)?;
        if namespace.is_empty() {
            Ok(name.to_string())
        } else {
            Ok(format!("{namespace}.{name}"))
        }
    }

    /// Namespace-qualified name for a type token (TypeDef, TypeRef or
    /// TypeSpec). Nested TypeRefs render as `Outer/Inner`.
    fn type_fullname(&self, token: Token) -> Result<String> {
        match token.table() {
            0x02 => {
                let row = self
                    .tables
                    .table::<TypeDefRaw>(TableId::TypeDef)
                    .and_then(|table| table.get(token.row()))
                    .ok_or_else(|| malformed_error!("TypeDef {} out of range", token))?;
                self.typedef_fullname(&row)
            }
            0x01 => {
                let table = self
                    .tables
                    .table::<TypeRefRaw>(TableId::TypeRef)
                    .ok_or_else(|| malformed_error!("TypeRef {} without a TypeRef table", token))?;

                // Walk outward through the nesting chain, bounded against
                // self-referential scopes in corrupt images.
                let mut segments = Vec::new();
                let mut current = token;
                for _ in 0..MAX_NESTING_DEPTH {
                    let row = table
                        .get(current.row())
                        .ok_or_else(|| malformed_error!("TypeRef {} out of range", current))?;
                    let name = self.string(row.type_name)?;
                    let namespace = self.string(row.type_namespace)?;
                    if namespace.is_empty() {
                        segments.push(name.to_string());
                    } else {
                        segments.push(format!("{namespace}.{name}"));
                    }

                    if row.resolution_scope.tag == TableId::TypeRef
                        && !row.resolution_scope.is_null()
                    {
                        current = row.resolution_scope.token;
                    } else {
                        segments.reverse();
                        return Ok(segments.join("/"));
                    }
                }
                Err(malformed_error!("TypeRef nesting too deep at {}", token))
            }
            0x1B => {
                let row = self
                    .tables
                    .table::<TypeSpecRaw>(TableId::TypeSpec)
                    .and_then(|table| table.get(token.row()))
                    .ok_or_else(|| malformed_error!("TypeSpec {} out of range", token))?;
                let signature =
                    SignatureParser::new(self.blob(row.signature)?).parse_type_spec_signature()?;
                self.type_name(&signature.base)
            }
            _ => Err(malformed_error!("{} does not name a type", token)),
        }
    }

    /// IL spelling of one signature type.
    fn type_name(&self, signature: &TypeSignature) -> Result<String> {
        Ok(match signature {
            TypeSignature::Void => "void".to_string(),
            TypeSignature::Boolean => "bool".to_string(),
            TypeSignature::Char => "char".to_string(),
            TypeSignature::I1 => "int8".to_string(),
            TypeSignature::U1 => "uint8".to_string(),
            TypeSignature::I2 => "int16".to_string(),
            TypeSignature::U2 => "uint16".to_string(),
            TypeSignature::I4 => "int32".to_string(),
            TypeSignature::U4 => "uint32".to_string(),
            TypeSignature::I8 => "int64".to_string(),
            TypeSignature::U8 => "uint64".to_string(),
            TypeSignature::R4 => "float32".to_string(),
            TypeSignature::R8 => "float64".to_string(),
            TypeSignature::I => "native int".to_string(),
            TypeSignature::U => "native uint".to_string(),
            TypeSignature::String => "string".to_string(),
            TypeSignature::Object => "object".to_string(),
            TypeSignature::TypedByRef => "typedref".to_string(),
            TypeSignature::Class(token) => {
                format!("class {}", self.type_fullname(*token)?)
            }
            TypeSignature::ValueType(token) => {
                format!("valuetype {}", self.type_fullname(*token)?)
            }
            TypeSignature::SzArray(array) => format!("{}[]", self.type_name(&array.base)?),
            TypeSignature::Array(array) => format!(
                "{}[{}]",
                self.type_name(&array.base)?,
                ",".repeat(array.rank.saturating_sub(1) as usize)
            ),
            TypeSignature::ByRef(inner) => format!("{}&", self.type_name(inner)?),
            TypeSignature::Ptr(pointer) => format!("{}*", self.type_name(&pointer.base)?),
            TypeSignature::Pinned(inner) => format!("{} pinned", self.type_name(inner)?),
            TypeSignature::GenericParamType(index) => format!("!{index}"),
            TypeSignature::GenericParamMethod(index) => format!("!!{index}"),
            TypeSignature::GenericInst(base, arguments) => {
                let mut rendered = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    rendered.push(self.type_name(argument)?);
                }
                format!("{}<{}>", self.type_name(base)?, rendered.join(", "))
            }
            TypeSignature::FnPtr(method) => {
                let mut rendered = Vec::with_capacity(method.params.len());
                for param in &method.params {
                    rendered.push(self.type_name(&param.base)?);
                }
                format!(
                    "method {} *({})",
                    self.type_name(&method.return_type.base)?,
                    rendered.join(", ")
                )
            }
            _ => "???".to_string(),
        })
    }

    fn string(&self, index: u32) -> Result<&'a str> {
        match self.image.strings() {
            Some(heap) => heap.get(index as usize),
            None => Err(malformed_error!("Image carries no #Strings heap")),
        }
    }

    fn blob(&self, index: u32) -> Result<&'a [u8]> {
        match self.image.blob() {
            Some(heap) => heap.get(index as usize),
            None => Err(malformed_error!("Image carries no #Blob heap")),
        }
    }
}

/// Emit the `// .try` region comments preceding a body's instructions.
fn exception_regions(
    out: &mut String,
    handlers: &[ExceptionHandler],
    type_name: impl Fn(Token) -> String,
) {
    for handler in handlers {
        let try_end = handler.try_offset + handler.try_length;
        let handler_end = handler.handler_offset + handler.handler_length;

        match handler.flags {
            ExceptionHandlerFlags::EXCEPTION => {
                let caught = type_name(Token::new(handler.class_token_or_filter));
                out.push_str(&format!(
                    "    // .try IL_{:04x} to IL_{:04x} catch {caught} handler IL_{:04x} to IL_{:04x}\n",
                    handler.try_offset, try_end, handler.handler_offset, handler_end
                ));
            }
            ExceptionHandlerFlags::FINALLY => {
                out.push_str(&format!(
                    "    // .try IL_{:04x} to IL_{:04x} finally handler IL_{:04x} to IL_{:04x}\n",
                    handler.try_offset, try_end, handler.handler_offset, handler_end
                ));
            }
            ExceptionHandlerFlags::FAULT => {
                out.push_str(&format!(
                    "    // .try IL_{:04x} to IL_{:04x} fault handler IL_{:04x} to IL_{:04x}\n",
                    handler.try_offset, try_end, handler.handler_offset, handler_end
                ));
            }
            ExceptionHandlerFlags::FILTER => {
                out.push_str(&format!(
                    "    // .try IL_{:04x} to IL_{:04x} filter IL_{:04x} handler IL_{:04x} to IL_{:04x}\n",
                    handler.try_offset,
                    try_end,
                    handler.class_token_or_filter,
                    handler.handler_offset,
                    handler_end
                ));
            }
            _ => {
                out.push_str(&format!(
                    "    // .try IL_{:04x} to IL_{:04x} unknown handler IL_{:04x} to IL_{:04x}\n",
                    handler.try_offset, try_end, handler.handler_offset, handler_end
                ));
            }
        }
    }
}

fn immediate_text(immediate: &Immediate) -> String {
    match immediate {
        Immediate::Int8(value) => format!("{value}"),
        Immediate::UInt8(value) => format!("{value}"),
        Immediate::Int16(value) => format!("{value}"),
        Immediate::UInt16(value) => format!("{value}"),
        Immediate::Int32(value) => format!("{value}"),
        Immediate::UInt32(value) => format!("{value}"),
        Immediate::Int64(value) => format!("{value}"),
        Immediate::UInt64(value) => format!("{value}"),
        Immediate::Float32(value) => format!("{value}"),
        Immediate::Float64(value) => format!("{value}"),
    }
}

/// Quote a user string, truncating the displayed text past 60 characters.
fn quoted_string(text: &str) -> String {
    if text.chars().count() > 60 {
        let cut: String = text.chars().take(57).collect();
        format!("\"{cut}...\"")
    } else {
        format!("\"{text}\"")
    }
}

fn field_access(flags: u32) -> &'static str {
    match flags & FieldAttributes::FIELD_ACCESS_MASK {
        FieldAttributes::PRIVATE => "private",
        FieldAttributes::FAM_AND_ASSEM => "famandassem",
        FieldAttributes::ASSEMBLY => "assembly",
        FieldAttributes::FAMILY => "family",
        FieldAttributes::FAM_OR_ASSEM => "famorassem",
        FieldAttributes::PUBLIC => "public",
        _ => "privatescope",
    }
}

fn method_access(flags: MethodAccessFlags) -> &'static str {
    if flags == MethodAccessFlags::PRIVATE {
        "private"
    } else if flags == MethodAccessFlags::FAM_AND_ASSEM {
        "famandassem"
    } else if flags == MethodAccessFlags::ASSEM {
        "assembly"
    } else if flags == MethodAccessFlags::FAMILY {
        "family"
    } else if flags == MethodAccessFlags::FAM_OR_ASSEM {
        "famorassem"
    } else if flags == MethodAccessFlags::PUBLIC {
        "public"
    } else {
        "privatescope"
    }
}

fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{byte:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        file::File,
        test::{hello_image, module_only_image},
    };

    fn listing(order: MemberOrder) -> String {
        let file = File::from_mem(hello_image()).unwrap();
        let image = CilImage::parse(&file).unwrap();
        render_il(&image, order).unwrap()
    }

    #[test]
    fn header_blocks() {
        let listing = listing(MemberOrder::ByName);

        assert!(listing.starts_with(".assembly extern 'mscorlib' {\n"));
        assert!(listing.contains("  .publickeytoken = (B7 7A 5C 56 19 34 E0 89)\n"));
        assert!(listing.contains("  .ver 4:0:0:0\n"));
        assert!(listing.contains(".assembly 'MyApp' {\n"));
        assert!(listing.contains("  .hash algorithm 0x00008004\n"));
        assert!(listing.contains("  .ver 1:2:3:4\n"));
        assert!(listing.contains(".module MyApp.dll\n"));
    }

    #[test]
    fn mvid_never_appears() {
        // The #GUID heap of the fixture holds bytes 1..=16; none of the
        // textual forms of that GUID may leak into the listing.
        let listing = listing(MemberOrder::ByName);
        assert!(!listing.to_lowercase().contains("mvid"));
        assert!(!listing.contains("04030201"));
    }

    #[test]
    fn class_and_field_lines() {
        let listing = listing(MemberOrder::ByName);

        assert!(listing.contains(".class public auto ansi MyApp.Program\n{\n"));
        // System.Object bases are implicit.
        assert!(!listing.contains("extends"));
        assert!(listing.contains("  .field private static int32 counter\n"));
        assert!(listing.contains("} // end of class\n"));
    }

    #[test]
    fn method_bodies() {
        let listing = listing(MemberOrder::ByName);

        assert!(listing
            .contains("  .method public hidebysig static void Main() cil managed\n"));
        assert!(listing.contains(
            "  .method public hidebysig specialname rtspecialname instance void .ctor() cil managed\n"
        ));
        assert!(listing.contains("    .entrypoint\n    .maxstack 8\n    IL_0000: nop\n"));
        assert!(listing.contains("    IL_0000: ldarg.0\n    IL_0001: ret\n"));
        assert!(listing.contains("  } // end of method Main\n"));
    }

    #[test]
    fn by_name_order_puts_ctor_before_main() {
        let listing = listing(MemberOrder::ByName);

        let ctor = listing.find(".ctor()").unwrap();
        let main = listing.find("Main()").unwrap();
        assert!(ctor < main);
    }

    #[test]
    fn declaration_order_keeps_main_first() {
        let listing = listing(MemberOrder::Declaration);

        let ctor = listing.find(".ctor()").unwrap();
        let main = listing.find("Main()").unwrap();
        assert!(main < ctor);
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(listing(MemberOrder::ByName), listing(MemberOrder::ByName));
    }

    #[test]
    fn module_without_manifest_has_no_assembly_block() {
        let file = File::from_mem(module_only_image()).unwrap();
        let image = CilImage::parse(&file).unwrap();
        let listing = render_il(&image, MemberOrder::ByName).unwrap();

        assert!(!listing.contains(".assembly 'MyApp'"));
        assert!(listing.contains(".assembly extern 'mscorlib'"));
        assert!(listing.contains(".module MyApp.dll\n"));
    }

    #[test]
    fn quoted_strings_truncate_on_char_boundaries() {
        assert_eq!(quoted_string("hi"), "\"hi\"");

        let long: String = "é".repeat(80);
        let quoted = quoted_string(&long);
        assert!(quoted.ends_with("...\""));
        assert_eq!(quoted.chars().count(), 57 + 5);
    }

    #[test]
    fn entry_point_marked_exactly_once() {
        let listing = listing(MemberOrder::ByName);
        assert_eq!(listing.matches(".entrypoint").count(), 1);
    }
}
