//! End-to-end generation from a JSON package descriptor

use std::fs;

use mock_weld::build::{GenerateOptions, MockBuilder, OutputTarget};
use mock_weld::extract::JsonPackageLoader;
use mock_weld::ir::NamingStrategy;
use mock_weld::{ExtractError, WeldError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const CLIENT_PACKAGE: &str = r#"{
    "path": "example.com/client",
    "declarations": [
        {
            "name": "Client",
            "ty": { "capability_set": [
                { "name": "Do", "signature": {
                    "params": [{ "ty": { "basic": "string" } }],
                    "results": [{ "basic": "bool" }]
                } }
            ] }
        },
        {
            "name": "Options",
            "ty": { "composite": [] }
        }
    ]
}"#;

const EXPECTED: &str = r#"// Code generated by mock-weld; DO NOT EDIT.

package mocks

import (
	"sync"

	"example.com/client"
)

// MockTestClient is a mock implementation of the Client interface (from the
// package example.com/client) used for unit testing.
type MockTestClient struct {
	// DoFunc is an instance of a mock function object controlling the
	// behavior of the method Do.
	DoFunc *TestClientDoFunc
}

// NewMockTestClient creates a new mock of the Client interface. All methods
// return zero values for all results, unless overwritten.
func NewMockTestClient() *MockTestClient {
	return &MockTestClient{
		DoFunc: &TestClientDoFunc{
			defaultBehavior: func(string) bool {
				return false
			},
		},
	}
}

// NewStrictMockTestClient creates a new mock of the Client interface. All
// methods panic on invocation, unless overwritten.
func NewStrictMockTestClient() *MockTestClient {
	return &MockTestClient{
		DoFunc: &TestClientDoFunc{
			defaultBehavior: func(string) bool {
				panic("unexpected invocation of MockTestClient.Do")
			},
		},
	}
}

// NewMockTestClientFrom creates a new mock of the Client interface. All
// methods delegate to the given implementation, unless overwritten.
func NewMockTestClientFrom(i client.Client) *MockTestClient {
	return &MockTestClient{
		DoFunc: &TestClientDoFunc{
			defaultBehavior: i.Do,
		},
	}
}

// TestClientDoFunc describes the behavior when the Do method of the parent
// MockTestClient instance is invoked.
type TestClientDoFunc struct {
	defaultBehavior func(string) bool
	behaviors       []func(string) bool
	history         []TestClientDoFuncCall
	mutex           sync.Mutex
}

// Do delegates to the next behavior function in the queue and stores the
// parameter and result values of this invocation.
func (m *MockTestClient) Do(v0 string) bool {
	r0 := m.DoFunc.nextBehavior()(v0)
	m.DoFunc.appendCall(TestClientDoFuncCall{v0, r0})
	return r0
}

// SetDefaultBehavior sets function that is called when the Do method of the
// parent MockTestClient instance is invoked and the behavior queue is
// empty.
func (f *TestClientDoFunc) SetDefaultBehavior(hook func(string) bool) {
	f.mutex.Lock()
	f.defaultBehavior = hook
	f.mutex.Unlock()
}

// PushBehavior adds a function to the end of the behavior queue. Each
// invocation of the Do method of the parent MockTestClient instance invokes
// the behavior at the front of the queue and discards it. After the queue
// is empty, the default behavior function is invoked for any future action.
func (f *TestClientDoFunc) PushBehavior(hook func(string) bool) {
	f.mutex.Lock()
	f.behaviors = append(f.behaviors, hook)
	f.mutex.Unlock()
}

// SetDefaultReturn calls SetDefaultBehavior with a function that returns
// the given values.
func (f *TestClientDoFunc) SetDefaultReturn(r0 bool) {
	f.SetDefaultBehavior(func(string) bool {
		return r0
	})
}

// PushReturn calls PushBehavior with a function that returns the given
// values.
func (f *TestClientDoFunc) PushReturn(r0 bool) {
	f.PushBehavior(func(string) bool {
		return r0
	})
}

func (f *TestClientDoFunc) nextBehavior() func(string) bool {
	f.mutex.Lock()
	defer f.mutex.Unlock()

	if len(f.behaviors) == 0 {
		return f.defaultBehavior
	}

	behavior := f.behaviors[0]
	f.behaviors = f.behaviors[1:]
	return behavior
}

func (f *TestClientDoFunc) appendCall(r0 TestClientDoFuncCall) {
	f.mutex.Lock()
	f.history = append(f.history, r0)
	f.mutex.Unlock()
}

// History returns a sequence of TestClientDoFuncCall objects describing the
// invocations of this function.
func (f *TestClientDoFunc) History() []TestClientDoFuncCall {
	f.mutex.Lock()
	history := make([]TestClientDoFuncCall, len(f.history))
	copy(history, f.history)
	f.mutex.Unlock()

	return history
}

// TestClientDoFuncCall is an object that describes an invocation of method
// Do on an instance of MockTestClient.
type TestClientDoFuncCall struct {
	// Arg0 is the value of the 1st argument passed to this method
	// invocation.
	Arg0 string
	// Result0 is the value of the 1st result returned from this method
	// invocation.
	Result0 bool
}

// Args returns an interface slice containing the arguments of this
// invocation.
func (c TestClientDoFuncCall) Args() []interface{} {
	return []interface{}{c.Arg0}
}

// Results returns an interface slice containing the results of this
// invocation.
func (c TestClientDoFuncCall) Results() []interface{} {
	return []interface{}{c.Result0}
}
"#;

fn write_package(dir: &TempDir) -> String {
    let path = dir.path().join("client.json");
    fs::write(&path, CLIENT_PACKAGE).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_generate_client_mock() {
    let dir = TempDir::new().unwrap();
    let location = write_package(&dir);

    let options = GenerateOptions::new(vec![location])
        .import_path("example.com/app/mocks")
        .naming(NamingStrategy::new("Test"))
        .output(OutputTarget::Stdout);

    let output = MockBuilder::new(options)
        .build_with(&JsonPackageLoader::new())
        .unwrap();

    assert_eq!(output.rendered.as_deref(), Some(EXPECTED));
}

#[test]
fn test_generate_into_directory() {
    let dir = TempDir::new().unwrap();
    let location = write_package(&dir);
    let out = dir.path().join("mocks");

    let options = GenerateOptions::new(vec![location])
        .import_path("example.com/app/mocks")
        .naming(NamingStrategy::new("Test"))
        .output(OutputTarget::Directory(out.clone()))
        .disable_formatting(true);

    let output = MockBuilder::new(options)
        .build_with(&JsonPackageLoader::new())
        .unwrap();

    let path = out.join("test_client_mock.go");
    assert_eq!(output.written, vec![path.clone()]);
    assert_eq!(fs::read_to_string(path).unwrap(), EXPECTED);
}

#[test]
fn test_relative_locations_resolve_against_root() {
    let dir = TempDir::new().unwrap();
    write_package(&dir);

    let options = GenerateOptions::new(vec!["client.json".to_string()])
        .package("mocks")
        .output(OutputTarget::Stdout);

    let output = MockBuilder::new(options)
        .build_with(&JsonPackageLoader::new().root(dir.path()))
        .unwrap();
    assert!(output.rendered.unwrap().contains("type MockClient struct {"));
}

#[test]
fn test_unknown_interface_is_reported() {
    let dir = TempDir::new().unwrap();
    let location = write_package(&dir);

    let options = GenerateOptions::new(vec![location])
        .package("mocks")
        .interfaces(vec!["Client".to_string(), "Server".to_string()])
        .output(OutputTarget::Stdout);

    let err = MockBuilder::new(options)
        .build_with(&JsonPackageLoader::new())
        .unwrap_err();

    assert!(matches!(err, WeldError::Extract(ExtractError::NotFound(ref name)) if name == "Server"));
    assert!(!err.is_internal());
}
