//! Function-local ids stamped on generic nodes.

use gotree_core::collections::FxHashMap;

use crate::native::NativeKey;

/// Ids handed out while one function body (or the file outside any
/// function) is being mapped.
#[derive(Debug, Default)]
pub struct IdScope {
    last_id: i32,
    ids: FxHashMap<NativeKey, i32>,
}

impl IdScope {
    /// Next id for `key`. A key seen before is rebound to the new id.
    pub fn assign(&mut self, key: NativeKey) -> i32 {
        self.last_id += 1;
        self.ids.insert(key, self.last_id);
        self.last_id
    }

    pub fn get(&self, key: &NativeKey) -> Option<i32> {
        self.ids.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Stack of [`IdScope`]s. The bottom scope belongs to the file and is never
/// popped; each function or closure pushes its own.
#[derive(Debug)]
pub struct IdScopes {
    stack: Vec<IdScope>,
}

impl Default for IdScopes {
    fn default() -> Self {
        Self::new()
    }
}

impl IdScopes {
    pub fn new() -> Self {
        Self {
            stack: vec![IdScope::default()],
        }
    }

    pub fn enter(&mut self) {
        self.stack.push(IdScope::default());
    }

    /// Pops the innermost function scope; `None` at file level.
    pub fn leave(&mut self) -> Option<IdScope> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    pub fn assign(&mut self, key: NativeKey) -> i32 {
        self.current_mut().assign(key)
    }

    pub fn current(&self) -> &IdScope {
        // The file scope is never popped.
        &self.stack[self.stack.len() - 1]
    }

    fn current_mut(&mut self) -> &mut IdScope {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::NodeKind;

    fn key(pos: u32) -> NativeKey {
        NativeKey::new(NodeKind::ExprStmt, pos, pos + 1)
    }

    #[test]
    fn test_ids_count_from_one() {
        let mut scope = IdScope::default();
        assert_eq!(scope.assign(key(0)), 1);
        assert_eq!(scope.assign(key(5)), 2);
        assert_eq!(scope.get(&key(5)), Some(2));
        assert_eq!(scope.get(&key(9)), None);
    }

    #[test]
    fn test_rebinding_keeps_last_id() {
        let mut scope = IdScope::default();
        scope.assign(key(3));
        scope.assign(key(3));
        assert_eq!(scope.get(&key(3)), Some(2));
        assert_eq!(scope.len(), 1);
    }

    #[test]
    fn test_closure_scope_does_not_clobber_outer() {
        let mut scopes = IdScopes::new();
        scopes.enter();
        scopes.assign(key(1));
        scopes.assign(key(2));
        scopes.enter();
        assert_eq!(scopes.assign(key(10)), 1);
        let inner = scopes.leave().unwrap();
        assert_eq!(inner.get(&key(10)), Some(1));
        assert_eq!(scopes.current().get(&key(2)), Some(2));
        assert_eq!(scopes.assign(key(3)), 3);
    }

    #[test]
    fn test_file_scope_is_never_popped() {
        let mut scopes = IdScopes::new();
        assert!(scopes.leave().is_none());
        assert_eq!(scopes.assign(key(4)), 1);
        assert!(scopes.leave().is_none());
        assert_eq!(scopes.current().get(&key(4)), Some(1));
    }
}
