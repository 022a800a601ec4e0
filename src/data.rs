//
// Copyright (c) The yangkit Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! YANG instance data.

use bitflags::bitflags;
use std::ffi::CStr;
use std::ffi::CString;
use std::os::raw::{c_char, c_void};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::AsRawFd;
use std::path::Path;
use std::slice;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::iter::{
    Ancestors, MetadataList, NodeIterable, Set, Siblings, Traverse,
};
use crate::schema::{DataValue, SchemaModule, SchemaNode, SchemaNodeKind};
use crate::utils::*;
use libyang3_sys as ffi;

/// YANG data tree.
#[derive(Debug)]
pub struct DataTree<'a> {
    context: &'a Context,
    raw: *mut ffi::lyd_node,
}

/// YANG data node reference.
#[derive(Clone, Debug)]
pub struct DataNodeRef<'a, 'b> {
    tree: &'a DataTree<'b>,
    raw: *mut ffi::lyd_node,
}

/// Metadata of a data node.
///
/// Metadata attributes map to annotations as specified in RFC 7952. In XML
/// they are represented as standard XML attributes, in JSON as elements
/// starting with the '@' character.
#[derive(Clone, Debug)]
pub struct Metadata<'a, 'b> {
    dnode: &'a DataNodeRef<'a, 'b>,
    raw: *mut ffi::lyd_meta,
}

/// YANG data tree diff.
#[derive(Debug)]
pub struct DataDiff<'a> {
    tree: DataTree<'a>,
}

/// YANG data diff operation.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum DataDiffOp {
    Create,
    Delete,
    Replace,
}

/// Data input/output formats supported by libyang.
#[allow(clippy::upper_case_acronyms)]
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DataFormat {
    /// XML instance data format.
    XML = ffi::LYD_FORMAT::LYD_XML,
    /// JSON instance data format.
    JSON = ffi::LYD_FORMAT::LYD_JSON,
    /// LYB instance data format (binary).
    LYB = ffi::LYD_FORMAT::LYD_LYB,
}

bitflags! {
    /// Data parser options.
    ///
    /// By default the complete input is parsed, data without matching schema
    /// node definitions is silently ignored, and full validation according to
    /// all YANG rules is performed on the result.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct DataParserFlags: u32 {
        /// Parse only; no validation is performed. When statements are kept
        /// unevaluated, union types may not be fully resolved, if-feature
        /// statements are not checked, and default values are not added.
        const NO_VALIDATION = ffi::LYD_PARSE_ONLY;
        /// Instead of silently ignoring data without a schema definition,
        /// raise an error.
        const STRICT = ffi::LYD_PARSE_STRICT;
        /// Forbid state data in the parsed data.
        const NO_STATE = ffi::LYD_PARSE_NO_STATE;
    }
}

bitflags! {
    /// Data validation options.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct DataValidationFlags: u32 {
        /// Consider state data not allowed and raise an error if any is
        /// found.
        const NO_STATE = ffi::LYD_VALIDATE_NO_STATE;
        /// Validate only the modules whose data actually exist.
        const PRESENT = ffi::LYD_VALIDATE_PRESENT;
    }
}

bitflags! {
    /// Data printer options.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct DataPrinterFlags: u32 {
        /// Print also the (following) sibling nodes of the data node.
        const WITH_SIBLINGS = ffi::LYD_PRINT_WITHSIBLINGS;
        /// Output without indentation and formatting new lines.
        const SHRINK = ffi::LYD_PRINT_SHRINK;
        /// Preserve empty non-presence containers.
        const KEEP_EMPTY_CONT = ffi::LYD_PRINT_KEEPEMPTYCONT;
        /// Explicit with-defaults mode. Only the data explicitly present in
        /// the tree are printed. This is the default when no WD option is
        /// specified.
        const WD_EXPLICIT = ffi::LYD_PRINT_WD_EXPLICIT;
        /// Trim mode: nodes with the value equal to their default value are
        /// not printed.
        const WD_TRIM = ffi::LYD_PRINT_WD_TRIM;
        /// Include implicit default nodes.
        const WD_ALL = ffi::LYD_PRINT_WD_ALL;
    }
}

bitflags! {
    /// Data diff options.
    ///
    /// By default, default nodes are treated as non-existent and ignored.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct DataDiffFlags: u16 {
        /// Default nodes in the trees are not ignored but treated similarly
        /// to explicit nodes. Also, leaves and leaf-lists are added into the
        /// diff even in case only their default flag (state) was changed.
        const DEFAULTS = ffi::LYD_DIFF_DEFAULTS as u16;
    }
}

/// Methods common to data trees, data node references and data diffs.
pub trait Data<'a> {
    #[doc(hidden)]
    fn context(&self) -> &'a Context {
        self.tree().context
    }

    #[doc(hidden)]
    fn tree(&self) -> &DataTree<'a>;

    #[doc(hidden)]
    fn raw(&self) -> *mut ffi::lyd_node;

    /// Search in the data for instances of nodes matching the provided XPath.
    ///
    /// The expected format of the expression is JSON, meaning the first node
    /// in every path must have its module name as prefix, or be the special
    /// `*` value for all the nodes.
    ///
    /// If a list instance is being selected with all its key values specified
    /// (but not necessarily ordered) in the form
    /// `list[key1='val1'][key2='val2']`, or a leaf-list instance in the form
    /// `leaf-list[.='val']`, these instances are found using hashes with
    /// constant (*O(1)*) complexity (unless they are defined in top-level).
    fn find_xpath(&self, xpath: &str) -> Result<Set<'_, DataNodeRef<'_, 'a>>> {
        let xpath = CString::new(xpath).unwrap();
        let mut set = std::ptr::null_mut();

        let ret = unsafe {
            ffi::lyd_find_xpath(self.raw(), xpath.as_ptr(), &mut set)
        };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(self.context()));
        }

        // Copy the node pointers out of the set, then release it.
        let count = unsafe { (*set).count } as usize;
        let rnodes = if count == 0 {
            Vec::new()
        } else {
            let slice = unsafe {
                slice::from_raw_parts((*set).__bindgen_anon_1.dnodes, count)
            };
            slice.to_vec()
        };
        unsafe { ffi::ly_set_free(set, None) };

        Ok(Set::new(self.tree(), rnodes))
    }

    /// Search in the data for a single node matching the provided path.
    ///
    /// The expected format of the expression is JSON, as for
    /// [`Data::find_xpath`].
    fn find_path(&self, path: &str) -> Result<DataNodeRef<'_, 'a>> {
        let path = CString::new(path).unwrap();
        let mut rnode = std::ptr::null_mut();

        let ret = unsafe {
            ffi::lyd_find_path(self.raw(), path.as_ptr(), 0u8, &mut rnode)
        };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(self.context()));
        }

        Ok(unsafe { DataNodeRef::from_raw(self.tree(), rnode) })
    }

    /// Print the data in the specified format into a file descriptor.
    fn print_file<F: AsRawFd>(
        &self,
        fd: F,
        format: DataFormat,
        options: DataPrinterFlags,
    ) -> Result<()> {
        let ret = unsafe {
            ffi::lyd_print_fd(
                fd.as_raw_fd(),
                self.raw(),
                format as u32,
                options.bits(),
            )
        };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(self.context()));
        }

        Ok(())
    }

    /// Print the data in the specified format to a `String`.
    ///
    /// # Warning
    /// For printing a data tree in the `DataFormat::LYB` format, use the
    /// [`Data::print_bytes`] method instead. The `LYB` format can contain
    /// invalid UTF-8 sequences, which cannot be represented in a `String`.
    fn print_string(
        &self,
        format: DataFormat,
        options: DataPrinterFlags,
    ) -> Result<String> {
        let mut cstr = std::ptr::null_mut();

        let ret = unsafe {
            ffi::lyd_print_mem(
                &mut cstr,
                self.raw(),
                format as u32,
                options.bits(),
            )
        };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(self.context()));
        }

        Ok(char_ptr_to_string(cstr))
    }

    /// Print the data in the specified format to a bytes vector.
    fn print_bytes(
        &self,
        format: DataFormat,
        options: DataPrinterFlags,
    ) -> Result<Vec<u8>> {
        let mut cstr = std::ptr::null_mut();

        let ret = unsafe {
            ffi::lyd_print_mem(
                &mut cstr,
                self.raw(),
                format as u32,
                options.bits(),
            )
        };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(self.context()));
        }

        let bytes = match format {
            DataFormat::XML | DataFormat::JSON => {
                // Null-terminated C string.
                let mut bytes =
                    unsafe { CStr::from_ptr(cstr) }.to_bytes().to_vec();
                bytes.push(0);
                bytes
            }
            DataFormat::LYB => {
                // LYB data isn't null-terminated; its length is stored in the
                // header.
                let len = unsafe { ffi::lyd_lyb_data_length(cstr) };
                unsafe { slice::from_raw_parts(cstr as _, len as _) }.to_vec()
            }
        };
        Ok(bytes)
    }
}

// ===== impl DataTree =====

impl<'a> DataTree<'a> {
    /// Create a new empty data tree.
    pub fn new(context: &'a Context) -> DataTree<'a> {
        DataTree {
            context,
            raw: std::ptr::null_mut(),
        }
    }

    /// Parse (and validate) input data from a string as a YANG data tree.
    pub fn parse_string(
        context: &'a Context,
        data: impl AsRef<[u8]>,
        format: DataFormat,
        parser_options: DataParserFlags,
        validation_options: DataValidationFlags,
    ) -> Result<DataTree<'a>> {
        let mut rnode = std::ptr::null_mut();

        // libyang expects a null-terminated buffer.
        let mut data = data.as_ref().to_vec();
        data.push(0);

        let ret = unsafe {
            ffi::lyd_parse_data_mem(
                context.raw,
                data.as_ptr() as _,
                format as u32,
                parser_options.bits(),
                validation_options.bits(),
                &mut rnode,
            )
        };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(context));
        }

        Ok(unsafe { DataTree::from_raw(context, rnode) })
    }

    /// Parse (and validate) input data from an open file as a YANG data
    /// tree.
    pub fn parse_file<F: AsRawFd>(
        context: &'a Context,
        fd: F,
        format: DataFormat,
        parser_options: DataParserFlags,
        validation_options: DataValidationFlags,
    ) -> Result<DataTree<'a>> {
        let mut rnode = std::ptr::null_mut();

        let ret = unsafe {
            ffi::lyd_parse_data_fd(
                context.raw,
                fd.as_raw_fd(),
                format as u32,
                parser_options.bits(),
                validation_options.bits(),
                &mut rnode,
            )
        };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(context));
        }

        Ok(unsafe { DataTree::from_raw(context, rnode) })
    }

    /// Parse (and validate) input data from a file path as a YANG data tree.
    pub fn parse_path<P: AsRef<Path>>(
        context: &'a Context,
        path: P,
        format: DataFormat,
        parser_options: DataParserFlags,
        validation_options: DataValidationFlags,
    ) -> Result<DataTree<'a>> {
        let path =
            CString::new(path.as_ref().as_os_str().as_bytes()).unwrap();
        let mut input = std::ptr::null_mut();

        let ret = unsafe {
            ffi::ly_in_new_filepath(path.as_ptr(), 0, &mut input)
        };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(context));
        }

        let mut rnode = std::ptr::null_mut();
        let ret = unsafe {
            ffi::lyd_parse_data(
                context.raw,
                std::ptr::null_mut(),
                input,
                format as u32,
                parser_options.bits(),
                validation_options.bits(),
                &mut rnode,
            )
        };
        unsafe { ffi::ly_in_free(input, 0) };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(context));
        }

        Ok(unsafe { DataTree::from_raw(context, rnode) })
    }

    /// Returns a reference to the first top-level data node, unless the data
    /// tree is empty.
    pub fn reference(&self) -> Option<DataNodeRef<'_, 'a>> {
        if self.raw.is_null() {
            None
        } else {
            Some(DataNodeRef {
                tree: self,
                raw: self.raw,
            })
        }
    }

    /// Create a new node or modify an existing one in the data tree, based
    /// on a path.
    ///
    /// If the path points to a list key and the list instance does not
    /// exist, the key value from the predicate is used and `value` is
    /// ignored.
    ///
    /// The `output` parameter can be used to consider RPC/action output
    /// schema nodes instead of input ones.
    ///
    /// Returns the last created or modified node (if any).
    pub fn new_path(
        &mut self,
        path: &str,
        value: Option<&str>,
        output: bool,
    ) -> Result<Option<DataNodeRef<'_, 'a>>> {
        let path = CString::new(path).unwrap();
        let mut rnode_root = std::ptr::null_mut();
        let mut rnode = std::ptr::null_mut();
        let value_cstr;

        let (value_ptr, value_len) = match value {
            Some(value) => {
                value_cstr = CString::new(value).unwrap();
                (value_cstr.as_ptr(), value.len())
            }
            None => (std::ptr::null(), 0),
        };

        let mut options = ffi::LYD_NEW_PATH_UPDATE;
        if output {
            options |= ffi::LYD_NEW_VAL_OUTPUT;
        }

        let ret = unsafe {
            ffi::lyd_new_path2(
                self.raw,
                self.context.raw,
                path.as_ptr(),
                value_ptr as *const c_void,
                value_len,
                ffi::LYD_ANYDATA_VALUETYPE::LYD_ANYDATA_STRING,
                options,
                &mut rnode_root,
                &mut rnode,
            )
        };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(self.context));
        }

        // Update the top-level sibling.
        if self.raw.is_null() {
            self.raw = unsafe { ffi::lyd_first_sibling(rnode_root) };
        } else {
            self.raw = unsafe { ffi::lyd_first_sibling(self.raw) };
        }

        Ok(unsafe { DataNodeRef::from_raw_opt(self.tree(), rnode) })
    }

    /// Remove the data node found at the given path, together with its
    /// subtree.
    pub fn remove(&mut self, path: &str) -> Result<()> {
        let dnode = self.find_path(path)?;
        let raw = dnode.raw;

        // The removed node might be the tracked top-level sibling.
        if raw == self.raw {
            self.raw = unsafe { (*raw).next };
        }
        unsafe { ffi::lyd_free_tree(raw) };
        Ok(())
    }

    /// Fully validate the data tree.
    pub fn validate(&mut self, options: DataValidationFlags) -> Result<()> {
        let ret = unsafe {
            ffi::lyd_validate_all(
                &mut self.raw,
                self.context.raw,
                options.bits(),
                std::ptr::null_mut(),
            )
        };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(self.context));
        }

        Ok(())
    }

    /// Create a copy of the data tree.
    pub fn duplicate(&self) -> Result<DataTree<'a>> {
        // Special handling for empty data trees.
        if self.raw.is_null() {
            return Ok(unsafe {
                DataTree::from_raw(self.context, std::ptr::null_mut())
            });
        }

        let mut dup = std::ptr::null_mut();
        let options = ffi::LYD_DUP_RECURSIVE | ffi::LYD_DUP_WITH_FLAGS;
        let ret = unsafe {
            ffi::lyd_dup_siblings(
                self.raw,
                std::ptr::null_mut(),
                options,
                &mut dup,
            )
        };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(self.context));
        }

        Ok(unsafe { DataTree::from_raw(self.context, dup) })
    }

    /// Merge the source data tree into the target data tree. The merge may
    /// not be complete until validation is called on the resulting data tree
    /// (data from more cases may be present, default and non-default
    /// values).
    pub fn merge(&mut self, source: &DataTree<'a>) -> Result<()> {
        // Special handling for empty data trees.
        if self.raw.is_null() {
            *self = source.duplicate()?;
        } else {
            let options = 0u16;
            let ret = unsafe {
                ffi::lyd_merge_siblings(&mut self.raw, source.raw, options)
            };
            if ret != ffi::LY_ERR::LY_SUCCESS {
                return Err(Error::new(self.context));
            }
        }

        Ok(())
    }

    /// Learn the differences between two data trees.
    ///
    /// The resulting diff is represented as a data tree with specific
    /// metadata from the internal 'yang' module. Every node carries an
    /// effective 'operation' metadata; if there is none defined on the node,
    /// it inherits the operation from the nearest parent.
    pub fn diff(
        &self,
        dtree: &DataTree<'a>,
        options: DataDiffFlags,
    ) -> Result<DataDiff<'a>> {
        let mut rnode = std::ptr::null_mut();

        let ret = unsafe {
            ffi::lyd_diff_siblings(
                self.raw,
                dtree.raw,
                options.bits(),
                &mut rnode,
            )
        };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(self.context));
        }

        Ok(DataDiff {
            tree: unsafe { DataTree::from_raw(dtree.context, rnode) },
        })
    }

    /// Apply the whole diff tree on the data tree.
    pub fn diff_apply(&mut self, diff: &DataDiff<'a>) -> Result<()> {
        let ret =
            unsafe { ffi::lyd_diff_apply_all(&mut self.raw, diff.tree.raw) };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(self.context));
        }

        Ok(())
    }

    /// Returns an iterator over all elements in the data tree and its
    /// sibling trees (depth-first search algorithm).
    pub fn traverse(&self) -> impl Iterator<Item = DataNodeRef<'_, 'a>> {
        let top = Siblings::new(self.reference());
        top.flat_map(|dnode| dnode.traverse())
    }
}

impl<'a> Data<'a> for DataTree<'a> {
    fn tree(&self) -> &DataTree<'a> {
        self
    }

    fn raw(&self) -> *mut ffi::lyd_node {
        self.raw
    }
}

unsafe impl<'a> Binding<'a> for DataTree<'a> {
    type CType = ffi::lyd_node;
    type Container = Context;

    unsafe fn from_raw(
        context: &'a Context,
        raw: *mut ffi::lyd_node,
    ) -> DataTree<'a> {
        DataTree { context, raw }
    }
}

unsafe impl Send for DataTree<'_> {}
unsafe impl Sync for DataTree<'_> {}

impl Drop for DataTree<'_> {
    fn drop(&mut self) {
        unsafe { ffi::lyd_free_all(self.raw) };
    }
}

// ===== impl DataNodeRef =====

impl<'a, 'b> DataNodeRef<'a, 'b> {
    /// Schema definition of this node.
    pub fn schema(&self) -> SchemaNode<'_> {
        let raw = unsafe { (*self.raw).schema };
        unsafe { SchemaNode::from_raw(self.context(), raw as *mut _) }
    }

    /// Get the owner module of the data node. It is the module of the
    /// top-level schema node. In case of augments it is the target module,
    /// recursively; otherwise it is the module where the data node is
    /// defined.
    pub fn owner_module(&self) -> SchemaModule<'_> {
        let module = unsafe { ffi::lyd_owner_module(self.raw()) };
        unsafe { SchemaModule::from_raw(self.context(), module as *mut _) }
    }

    /// Returns an iterator over the ancestor data nodes.
    pub fn ancestors(&self) -> Ancestors<'a, DataNodeRef<'a, 'b>> {
        Ancestors::new(self.parent())
    }

    /// Returns an iterator over this data node and its ancestors.
    pub fn inclusive_ancestors(&self) -> Ancestors<'a, DataNodeRef<'a, 'b>> {
        Ancestors::new(Some(self.clone()))
    }

    /// Returns an iterator over the sibling data nodes.
    pub fn siblings(&self) -> Siblings<'a, DataNodeRef<'a, 'b>> {
        Siblings::new(self.next_sibling())
    }

    /// Returns an iterator over this data node and its siblings.
    pub fn inclusive_siblings(&self) -> Siblings<'a, DataNodeRef<'a, 'b>> {
        Siblings::new(Some(self.clone()))
    }

    /// Returns an iterator over the child data nodes.
    pub fn children(&self) -> Siblings<'a, DataNodeRef<'a, 'b>> {
        Siblings::new(self.first_child())
    }

    /// Returns an iterator over all elements in the data subtree
    /// (depth-first search algorithm).
    pub fn traverse(&self) -> Traverse<'a, DataNodeRef<'a, 'b>> {
        Traverse::new(self.clone())
    }

    /// Returns an iterator over the keys of the list.
    pub fn list_keys(&self) -> impl Iterator<Item = DataNodeRef<'a, 'b>> {
        self.children().filter(|dnode| dnode.schema().is_list_key())
    }

    /// Returns an iterator over all metadata associated to this node.
    pub fn meta(&self) -> MetadataList<'_, 'b> {
        let rmeta = unsafe { (*self.raw).meta };
        let meta = unsafe { Metadata::from_raw_opt(self, rmeta) };
        MetadataList::new(meta)
    }

    /// Generate the path of the node.
    pub fn path(&self) -> String {
        let mut buf: [c_char; 4096] = [0; 4096];

        let pathtype = ffi::LYD_PATH_TYPE::LYD_PATH_STD;
        let ret = unsafe {
            ffi::lyd_path(self.raw, pathtype, buf.as_mut_ptr(), buf.len())
        };
        if ret.is_null() {
            panic!("Failed to generate path of the data node");
        }

        char_ptr_to_string(buf.as_ptr())
    }

    /// Node's value (canonical string representation).
    pub fn value_canonical(&self) -> Option<String> {
        match self.schema().kind() {
            SchemaNodeKind::Leaf | SchemaNodeKind::LeafList => {
                let rnode = self.raw as *mut ffi::lyd_node_term;
                let mut value = unsafe { (*rnode).value._canonical };
                if value.is_null() {
                    value = unsafe {
                        ffi::lyd_value_get_canonical(
                            self.context().raw,
                            &(*rnode).value,
                        )
                    };
                }
                char_ptr_to_opt_string(value)
            }
            _ => None,
        }
    }

    /// Node's value (typed representation).
    pub fn value(&self) -> Option<DataValue> {
        match self.schema().kind() {
            SchemaNodeKind::Leaf | SchemaNodeKind::LeafList => {
                let rnode = self.raw as *const ffi::lyd_node_term;
                let rvalue = unsafe { &(*rnode).value };
                let value =
                    unsafe { DataValue::from_raw(self.tree.context, rvalue) };
                Some(value)
            }
            _ => None,
        }
    }

    /// Check whether the node value equals its default one.
    pub fn is_default(&self) -> bool {
        match self.schema().kind() {
            SchemaNodeKind::Leaf | SchemaNodeKind::LeafList => {
                (unsafe { ffi::lyd_is_default(self.raw) }) != 0
            }
            _ => false,
        }
    }

    /// Create a copy of the data subtree.
    ///
    /// When the `with_parents` parameter is set, all the node parents are
    /// duplicated as well. Keys are also duplicated for lists.
    pub fn duplicate(&self, with_parents: bool) -> Result<DataTree<'b>> {
        // Special handling for empty data trees.
        if self.raw.is_null() {
            return Ok(unsafe {
                DataTree::from_raw(self.tree.context, std::ptr::null_mut())
            });
        }

        let mut dup = std::ptr::null_mut();
        let mut options = ffi::LYD_DUP_RECURSIVE | ffi::LYD_DUP_WITH_FLAGS;
        if with_parents {
            options |= ffi::LYD_DUP_WITH_PARENTS;
        }
        let ret = unsafe {
            ffi::lyd_dup_single(
                self.raw,
                std::ptr::null_mut(),
                options,
                &mut dup,
            )
        };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(self.context()));
        }

        if with_parents {
            let mut dnode = unsafe { DataNodeRef::from_raw(self.tree, dup) };
            while let Some(parent) = dnode.parent() {
                dnode = parent;
            }
            dup = dnode.raw();
        }

        Ok(unsafe { DataTree::from_raw(self.tree.context, dup) })
    }

    /// Unlink the node from its data tree and free it, together with its
    /// subtree.
    pub fn remove(&mut self) {
        unsafe { ffi::lyd_unlink_tree(self.raw()) };
        unsafe { ffi::lyd_free_tree(self.raw()) };
    }
}

impl<'a> Data<'a> for DataNodeRef<'_, 'a> {
    fn tree(&self) -> &DataTree<'a> {
        self.tree
    }

    fn raw(&self) -> *mut ffi::lyd_node {
        self.raw
    }
}

unsafe impl<'a, 'b> Binding<'a> for DataNodeRef<'a, 'b> {
    type CType = ffi::lyd_node;
    type Container = DataTree<'b>;

    unsafe fn from_raw(
        tree: &'a DataTree<'b>,
        raw: *mut ffi::lyd_node,
    ) -> DataNodeRef<'a, 'b> {
        DataNodeRef { tree, raw }
    }
}

impl<'a, 'b> NodeIterable<'a> for DataNodeRef<'a, 'b> {
    fn parent(&self) -> Option<DataNodeRef<'a, 'b>> {
        // NOTE: can't use lyd_parent() since it's an inline function.
        let rparent = unsafe { (*self.raw).parent };
        if rparent.is_null() {
            return None;
        }
        let rparent = unsafe { &mut (*rparent).__bindgen_anon_1.node };
        unsafe { DataNodeRef::from_raw_opt(self.tree, rparent) }
    }

    fn next_sibling(&self) -> Option<DataNodeRef<'a, 'b>> {
        let rsibling = unsafe { (*self.raw).next };
        unsafe { DataNodeRef::from_raw_opt(self.tree, rsibling) }
    }

    fn first_child(&self) -> Option<DataNodeRef<'a, 'b>> {
        // NOTE: can't use lyd_child() since it's an inline function.
        let snode = unsafe { (*self.raw).schema };
        if snode.is_null() {
            let ropaq = self.raw as *mut ffi::lyd_node_opaq;
            let rchild = unsafe { (*ropaq).child };
            return unsafe { DataNodeRef::from_raw_opt(self.tree, rchild) };
        }

        let nodetype = unsafe { (*snode).nodetype as u32 };
        let rchild = match nodetype {
            ffi::LYS_CONTAINER
            | ffi::LYS_LIST
            | ffi::LYS_RPC
            | ffi::LYS_ACTION
            | ffi::LYS_NOTIF => {
                let rinner = self.raw as *mut ffi::lyd_node_inner;
                unsafe { (*rinner).child }
            }
            _ => std::ptr::null_mut(),
        };
        unsafe { DataNodeRef::from_raw_opt(self.tree, rchild) }
    }
}

impl PartialEq for DataNodeRef<'_, '_> {
    fn eq(&self, other: &DataNodeRef<'_, '_>) -> bool {
        self.raw == other.raw
    }
}

unsafe impl Send for DataNodeRef<'_, '_> {}
unsafe impl Sync for DataNodeRef<'_, '_> {}

// ===== impl Metadata =====

impl<'a, 'b> Metadata<'a, 'b> {
    /// Metadata name.
    pub fn name(&self) -> &str {
        char_ptr_to_str(unsafe { (*self.raw).name })
    }

    /// Metadata value (canonical string representation).
    pub fn value(&self) -> &str {
        let rvalue = unsafe { &(*self.raw).value };
        let mut canonical = rvalue._canonical;
        if canonical.is_null() {
            canonical = unsafe {
                ffi::lyd_value_get_canonical(
                    self.dnode.tree.context.raw,
                    rvalue,
                )
            };
        }
        char_ptr_to_str(canonical)
    }

    /// Next metadata of the same node.
    pub(crate) fn next(&self) -> Option<Metadata<'a, 'b>> {
        let rnext = unsafe { (*self.raw).next };
        unsafe { Metadata::from_raw_opt(self.dnode, rnext) }
    }
}

unsafe impl<'a, 'b> Binding<'a> for Metadata<'a, 'b> {
    type CType = ffi::lyd_meta;
    type Container = DataNodeRef<'a, 'b>;

    unsafe fn from_raw(
        dnode: &'a DataNodeRef<'a, 'b>,
        raw: *mut ffi::lyd_meta,
    ) -> Metadata<'a, 'b> {
        Metadata { dnode, raw }
    }
}

impl PartialEq for Metadata<'_, '_> {
    fn eq(&self, other: &Metadata<'_, '_>) -> bool {
        self.raw == other.raw
    }
}

unsafe impl Send for Metadata<'_, '_> {}
unsafe impl Sync for Metadata<'_, '_> {}

// ===== impl DataDiff =====

impl<'a> DataDiff<'a> {
    /// Parse (and validate) input data as a YANG data diff.
    pub fn parse_string(
        context: &'a Context,
        data: impl AsRef<[u8]>,
        format: DataFormat,
        parser_options: DataParserFlags,
        validation_options: DataValidationFlags,
    ) -> Result<DataDiff<'a>> {
        let dtree = DataTree::parse_string(
            context,
            data,
            format,
            parser_options,
            validation_options,
        )?;

        Ok(DataDiff { tree: dtree })
    }

    /// Returns an iterator over the data changes.
    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (DataDiffOp, DataNodeRef<'_, 'a>)> {
        self.tree.traverse().filter_map(|dnode| {
            match dnode.meta().find(|meta| meta.name() == "operation") {
                Some(meta) => match meta.value() {
                    "create" => Some((DataDiffOp::Create, dnode)),
                    "delete" => Some((DataDiffOp::Delete, dnode)),
                    "replace" => Some((DataDiffOp::Replace, dnode)),
                    "none" => None,
                    _ => unreachable!(),
                },
                None => None,
            }
        })
    }

    /// Reverse the diff: create becomes delete, delete becomes create, a
    /// move from place A to B becomes a move from B to A, and so on.
    pub fn reverse(&self) -> Result<DataDiff<'a>> {
        let mut rnode = std::ptr::null_mut();

        let ret =
            unsafe { ffi::lyd_diff_reverse_all(self.tree.raw, &mut rnode) };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(self.tree.context));
        }

        Ok(DataDiff {
            tree: unsafe { DataTree::from_raw(self.tree.context, rnode) },
        })
    }
}

impl<'a> Data<'a> for DataDiff<'a> {
    fn tree(&self) -> &DataTree<'a> {
        &self.tree
    }

    fn raw(&self) -> *mut ffi::lyd_node {
        self.tree.raw
    }
}
